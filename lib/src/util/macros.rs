/// Builds a [`Variables`](crate::Variables) map from `key => value` pairs, in
/// order.
#[doc(hidden)]
#[macro_export]
macro_rules! vars {
    ($($key:expr => $value:expr),* $(,)?) => ({
        #[allow(unused_mut)]
        let mut vars = $crate::Variables::new();
        $(vars.insert($key, $value.to_string());)*
        vars
    });
}

/// Evaluates the tokens and logs how long they took at `info` level.
#[doc(hidden)]
#[macro_export]
macro_rules! time {
    ($label:expr, $($token:tt)*) => ({
        let start = std::time::Instant::now();
        let value = { $($token)* };
        $crate::log::info!("| {} | {}ms", $label, start.elapsed().as_millis());
        value
    });
}

pub use {vars, time};
