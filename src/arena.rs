use std::collections::TryReserveError;
use std::mem;
use std::num::NonZeroUsize;

/// Index of an occupied slot. Stored off by one so that `Option<Handle>` is
/// the size of a `usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Handle(NonZeroUsize);

impl Handle {
    #[inline(always)]
    pub(crate) fn from_index(index: usize) -> Handle {
        match NonZeroUsize::new(index.wrapping_add(1)) {
            Some(raw) => Handle(raw),
            None => panic!("`Handle::from_index()` - `index` overflows!"),
        }
    }

    #[inline(always)]
    pub(crate) fn to_index(self) -> usize {
        self.0.get() - 1
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    // Vacant slots form a singly linked free list threaded through the slots
    // themselves, so releasing a slot never allocates.
    Vacant { next_free: Option<Handle> },
}

/// Slot storage for the nodes of a list. All links between nodes are handles
/// into the arena, which owns every node exclusively.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots_: Vec<Slot<T>>,
    free_head_: Option<Handle>,
    length_: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Arena<T> {
        Arena {
            slots_: Vec::new(),
            free_head_: None,
            length_: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.length_
    }

    /// Makes sure the next `alloc` will not need to grow the slot vector.
    pub(crate) fn try_reserve(&mut self) -> Result<(), TryReserveError> {
        if self.free_head_.is_none() {
            self.slots_.try_reserve(1)?;
        }

        Ok(())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        self.length_ += 1;

        match self.free_head_ {
            Some(handle) => {
                let slot = &mut self.slots_[handle.to_index()];
                self.free_head_ = match *slot {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => panic!("`Arena::alloc()` - free list points to an occupied slot!"),
                };
                *slot = Slot::Occupied(element);
                handle
            }
            None => {
                self.slots_.push(Slot::Occupied(element));
                Handle::from_index(self.slots_.len() - 1)
            }
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match self.slots_[handle.to_index()] {
            Slot::Occupied(ref element) => element,
            Slot::Vacant { .. } => panic!("`Arena::get()` - `handle` is vacant!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match self.slots_[handle.to_index()] {
            Slot::Occupied(ref mut element) => element,
            Slot::Vacant { .. } => panic!("`Arena::get_mut()` - `handle` is vacant!"),
        }
    }

    /// Moves the element out and recycles its slot.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let vacant = Slot::Vacant {
            next_free: self.free_head_,
        };

        match mem::replace(&mut self.slots_[handle.to_index()], vacant) {
            Slot::Occupied(element) => {
                self.free_head_ = Some(handle);
                self.length_ -= 1;
                if self.length_ == 0 {
                    // Nothing left to recycle for, give the peak-sized buffer back.
                    self.slots_.clear();
                    self.slots_.shrink_to_fit();
                    self.free_head_ = None;
                }
                element
            }
            Slot::Vacant { .. } => panic!("`Arena::take()` - `handle` is vacant!"),
        }
    }

    /// Drops every slot, occupied or not, without releasing the buffer.
    pub(crate) fn clear(&mut self) {
        self.slots_.clear();
        self.free_head_ = None;
        self.length_ = 0;
    }
}
