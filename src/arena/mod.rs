use std::{
    mem::replace,
    ops::{Index as IndexRO, IndexMut},
};

/// Handle of a slot in an [`Arena`].
///
/// Handles are only meaningful for the arena (or a clone of it) that produced them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Index(usize);

type Ref = Option<Index>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry<T> {
    Occupied(T),
    Free(Ref)
}

// ASSERT: user is responsible for dangling references
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Arena<T> {
    items: Vec<Entry<T>>,
    free: Ref,
    len: usize
}
impl<T> Arena<T> {
    #[inline]
    pub const fn new() -> Self {
        Self { items: Vec::new(), free: None, len: 0 }
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }
    #[inline]
    pub fn insert(&mut self, value: T) -> Index {
        self.len += 1;
        match self.free {
            Some(head) => {
                let next = replace(&mut self.items[head.0], Entry::Occupied(value));
                match next {
                    Entry::Free(next) => self.free = next,
                    Entry::Occupied(_) => unreachable!("free list points at an occupied slot")
                }
                head
            },
            None => {
                let index = Index(self.items.len());
                self.items.push(Entry::Occupied(value));
                index
            }
        }
    }
    #[inline]
    pub fn remove(&mut self, index: Index) -> Option<T> {
        let entry = self.items.get_mut(index.0)?;
        if let Entry::Free(_) = entry {
            return None;
        }
        let old = replace(entry, Entry::Free(self.free));
        self.free = Some(index);
        self.len -= 1;
        match old {
            Entry::Occupied(value) => Some(value),
            Entry::Free(_) => unreachable!("slot was checked to be occupied")
        }
    }
    #[inline]
    pub fn get(&self, index: Index) -> Option<&T> {
        match self.items.get(index.0) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None
        }
    }
    #[inline]
    pub fn contains(&self, index: Index) -> bool {
        matches!(self.items.get(index.0), Some(Entry::Occupied(_)))
    }
    #[inline]
    pub fn get_mut(&mut self, index: Index) -> Option<&mut T> {
        match self.items.get_mut(index.0) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None
        }
    }
}
impl<T> Default for Arena<T> {
    #[inline(always)]
    fn default() -> Self { Self::new() }
}
impl<T> IndexRO<Index> for Arena<T> {
    type Output = T;
    #[inline]
    fn index(&self, index: Index) -> &Self::Output {
        match self.get(index) {
            Some(value) => value,
            None => panic!("dangling arena index {:?}", index)
        }
    }
}
impl<T> IndexMut<Index> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, index: Index) -> &mut Self::Output {
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("dangling arena index {:?}", index)
        }
    }
}
