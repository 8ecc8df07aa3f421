use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

/// Holds at most one value per type.
#[derive(Debug, Default)]
pub struct TypeMap {
    values: HashMap<TypeId, Box<dyn Any>>,
}

impl TypeMap {
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.values.get(&TypeId::of::<T>())?.downcast_ref()
    }

    /// Store `value`, returning the value of the same type stored before.
    pub fn insert<T: 'static>(&mut self, value: T) -> Option<T> {
        self.values
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast().ok())
            .map(|old| *old)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_value_per_type() {
        let mut map = TypeMap::default();
        assert!(map.is_empty());

        assert_eq!(map.insert(7u32), None);
        assert_eq!(map.insert("seven"), None);
        assert_eq!(map.insert(8u32), Some(7));

        assert_eq!(map.get::<u32>(), Some(&8));
        assert_eq!(map.get::<&str>(), Some(&"seven"));
        assert_eq!(map.get::<u64>(), None);
        assert_eq!(map.len(), 2);
    }
}
