/// Assert that an expression matches a pattern, optionally with a guard.
///
/// On failure the value is printed using its [`Debug`](core::fmt::Debug)
/// implementation.
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat $(,)?) => {
        match $expr {
            $pat => {}
            value => ::core::panic!(
                "expected a value matching `{}`, got {value:?}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $guard:expr $(,)?) => {{
        let value = $expr;
        match &value {
            $pat if $guard => {}
            #[allow(unused_variables, reason = "bindings are only used by the guard")]
            $pat => ::core::panic!(
                "value {value:?} matches `{}` but not `{}`",
                ::core::stringify!($pat),
                ::core::stringify!($guard)
            ),
            _ => ::core::panic!(
                "expected a value matching `{}`, got {value:?}",
                ::core::stringify!($pat)
            ),
        }
    }};
}
