//! Identifiers and a simple allocator for engine-owned controllers.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TriggerId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RangeId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CounterId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CarouselId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RevealId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PromptId(pub u32);

/// Monotonic allocator. Each id family counts independently; ids are never reused
/// within one engine, so a stale handle can never address a newer controller.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_trigger: u32,
    next_range: u32,
    next_counter: u32,
    next_carousel: u32,
    next_reveal: u32,
    next_prompt: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_trigger(&mut self) -> TriggerId {
        let id = TriggerId(self.next_trigger);
        self.next_trigger = self.next_trigger.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_range(&mut self) -> RangeId {
        let id = RangeId(self.next_range);
        self.next_range = self.next_range.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_counter(&mut self) -> CounterId {
        let id = CounterId(self.next_counter);
        self.next_counter = self.next_counter.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_carousel(&mut self) -> CarouselId {
        let id = CarouselId(self.next_carousel);
        self.next_carousel = self.next_carousel.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_reveal(&mut self) -> RevealId {
        let id = RevealId(self.next_reveal);
        self.next_reveal = self.next_reveal.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_prompt(&mut self) -> PromptId {
        let id = PromptId(self.next_prompt);
        self.next_prompt = self.next_prompt.wrapping_add(1);
        id
    }
}
