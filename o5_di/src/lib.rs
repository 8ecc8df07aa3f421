//! Minimal compile time dependency injection.
//!
//! A [`Provider`] owns the root dependencies (configuration, database pool,
//! ...) and caches everything built from them, so each type is constructed at
//! most once per provider. Types opt in by implementing [`Build`], usually via
//! `#[derive(Build)]`.

#[cfg(test)]
extern crate self as o5_di;

pub use o5_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

pub trait Provider: Sized {
    /// Return a clone of the cached instance of `T`, if one has been built.
    fn get<T: 'static + Clone>(&self) -> Option<T>;
    /// Cache an instance of `T`.
    fn insert<T: 'static>(&mut self, value: T);
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}
