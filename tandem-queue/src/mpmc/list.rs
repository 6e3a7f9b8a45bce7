//! The node store backing the two-lock queue.
//!
//! Nodes are individually heap-allocated links of a singly linked list.
//! Allocation hands out a raw `NonNull` (via `Box::into_raw`) so that the
//! queue's tail alias can point into the list without fighting the borrow
//! checker over the head side's ownership; every node is returned to the
//! allocator through exactly one of [`Node::free`] or [`Node::into_value`].

use std::mem::MaybeUninit;
use std::ptr::{self, NonNull};

use crate::sync::AtomicPtr;

/// A single queue node.
///
/// The payload slot is `MaybeUninit` rather than `Option`: exactly one
/// node per queue (the current sentinel) has no payload, and every code
/// path that touches a node knows statically whether it is the sentinel.
///
/// State of the slot over a node's lifetime:
///
/// - allocated by [`Node::boxed`]: initialized, holds the enqueued value
/// - promoted to sentinel by a pop: moved out, must never be read again
/// - allocated by [`Node::sentinel`]: never initialized
pub(crate) struct Node<T> {
    /// Next node in append order; null for the most recently appended node.
    ///
    /// Atomic because the enqueue side publishes this field under the tail
    /// lock while the dequeue side reads it under the head lock. When the
    /// queue holds exactly one node both sides land on the same field, and
    /// the Release/Acquire pair on it is the only synchronization between
    /// the two lock domains.
    pub(crate) next: AtomicPtr<Node<T>>,

    /// The payload slot. Uninitialized for the sentinel.
    pub(crate) value: MaybeUninit<T>,
}

impl<T> Node<T> {
    /// Heap-allocates a node carrying `value`, with no successor.
    pub(crate) fn boxed(value: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            next: AtomicPtr::new(ptr::null_mut()),
            value: MaybeUninit::new(value),
        });

        // Box allocations are never null.
        unsafe { NonNull::new_unchecked(Box::into_raw(node)) }
    }

    /// Heap-allocates a sentinel node with an uninitialized payload slot.
    pub(crate) fn sentinel() -> NonNull<Node<T>> {
        let node = Box::new(Node {
            next: AtomicPtr::new(ptr::null_mut()),
            value: MaybeUninit::uninit(),
        });

        unsafe { NonNull::new_unchecked(Box::into_raw(node)) }
    }

    /// Returns the node to the allocator without touching its payload slot.
    ///
    /// # Safety
    ///
    /// - `node` must have come from [`Node::boxed`] or [`Node::sentinel`]
    ///   and must not be freed again.
    /// - No other thread may still reach `node`.
    /// - The payload slot must be uninitialized or already moved out;
    ///   an initialized payload would be leaked, not dropped.
    pub(crate) unsafe fn free(node: NonNull<Node<T>>) {
        // MaybeUninit never drops its contents, so this releases only the
        // node's own memory.
        drop(Box::from_raw(node.as_ptr()));
    }

    /// Moves the payload out of the node and returns the node to the
    /// allocator, as one ownership transfer.
    ///
    /// # Safety
    ///
    /// Same reachability and double-free rules as [`Node::free`], and the
    /// payload slot must be initialized. The caller must have loaded the
    /// node's `next` link beforehand if it still needs it.
    pub(crate) unsafe fn into_value(node: NonNull<Node<T>>) -> T {
        let node = Box::from_raw(node.as_ptr());
        let Node { value, .. } = *node;
        value.assume_init()
    }
}
