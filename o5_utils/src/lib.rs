pub use o5_utils_derive::trace_instrument;

mod macros;

/// Version of the backend as reported by the cli and the http client.
pub const fn o5_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub trait Apply: Sized {
    /// Pass `self` through `f` if `value` is present, otherwise return it
    /// unchanged.
    ///
    /// ```rust
    /// # use o5_utils::Apply;
    /// let greeting = String::from("hello").apply_map(Some("world"), |s, name| s + " " + name);
    /// assert_eq!(greeting, "hello world");
    /// assert_eq!(1.apply_map(None, |a, b: i32| a + b), 1);
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }
}

impl<T> Apply for T {}
