/// Declare a provider struct.
///
/// Plain fields are root dependencies which are cloned whenever they are
/// requested. Fields prefixed with `..` are nested providers; the listed types
/// are built by delegating to them.
#[macro_export]
macro_rules! provider {
    ($(#[doc=$doc:literal])* $vis:vis $ident:ident {
        $( $field:ident: $ty:ty, )*
        $( .. $bfield:ident: $base:ty { $($ity:ty,)* $(,)? } )*
    }) => {
        $(#[doc=$doc])*
        $vis struct $ident {
            _cache: $crate::TypeMap,
            $( $field: $ty, )*
            $( $bfield: $base, )*
        }

        impl $crate::Provider for $ident {
            fn get<T: 'static + ::core::clone::Clone>(&self) -> ::core::option::Option<T> {
                self._cache.get::<T>().cloned()
            }

            fn insert<T: 'static>(&mut self, value: T) {
                self._cache.insert(value);
            }
        }

        $(
            impl $crate::Build<$ident> for $ty {
                fn build(provider: &mut $ident) -> Self {
                    ::core::clone::Clone::clone(&provider.$field)
                }
            }
        )*

        $($(
            impl $crate::Build<$ident> for $ity {
                fn build(provider: &mut $ident) -> Self {
                    $crate::Provide::provide(&mut provider.$bfield)
                }
            }
        )*)*
    };
}
