use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
    ptr,
};
use trienode::{inspect::WellFormedChecker, ChildMap, NodeError};

thread_local! {
    static FAIL_ALLOCATIONS: Cell<bool> = const { Cell::new(false) };
}

/// Forwards to the system allocator unless failures are switched on for the
/// current thread.
struct FailingAlloc;

fn should_fail() -> bool {
    FAIL_ALLOCATIONS.try_with(|fail| fail.get()).unwrap_or(false)
}

unsafe impl GlobalAlloc for FailingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if should_fail() {
            return ptr::null_mut();
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if should_fail() {
            return ptr::null_mut();
        }
        System.realloc(ptr, layout, new_size)
    }
}

#[global_allocator]
static ALLOC: FailingAlloc = FailingAlloc;

/// Run `f` with every allocation on this thread failing.
fn without_memory<R>(f: impl FnOnce() -> R) -> R {
    FAIL_ALLOCATIONS.with(|fail| fail.set(true));
    let result = f();
    FAIL_ALLOCATIONS.with(|fail| fail.set(false));
    result
}

fn fixture() -> ChildMap<u64> {
    let mut node = ChildMap::new();
    node.set(1, 10).unwrap();
    node.set(3, 30).unwrap();
    node
}

#[test]
fn failed_insert_leaves_map_unchanged() {
    let mut node = fixture();
    // Use up any spare slots so the next insert has to grow the storage
    let mut key = 4u8;
    while node.len() < node.capacity() {
        node.set(key, u64::from(key)).unwrap();
        key += 1;
    }
    let before: Vec<(u8, u64)> = node.iter().map(|(key, child)| (key, *child)).collect();

    let result = without_memory(|| node.set(2, 20));
    assert!(matches!(result, Err(NodeError::OutOfMemory(_))));
    assert_eq!(node.len(), before.len());
    assert!(node.iter().map(|(key, child)| (key, *child)).eq(before));
    assert_eq!(WellFormedChecker::check(&node), Ok(()));

    // The map stays usable once memory is available again
    assert_eq!(node.set(2, 20), Ok(None));
    assert_eq!(node.get(2), Ok(&20));
}

#[test]
fn failed_insert_into_empty_map() {
    let mut node = ChildMap::<u64>::new();

    let result = without_memory(|| node.set(7, 70));
    assert!(matches!(result, Err(NodeError::OutOfMemory(_))));
    assert!(node.is_empty());
    assert_eq!(node.capacity(), 0);
}

#[test]
fn replace_does_not_allocate() {
    let mut node = fixture();

    let result = without_memory(|| node.set(3, 33));
    assert_eq!(result, Ok(Some(30)));
    assert!(node.iter().eq([(1u8, &10u64), (3, &33)]));
}

#[test]
fn delete_keeps_larger_storage_when_shrinking_fails() {
    let mut node = fixture();

    let result = without_memory(|| node.delete(1));
    assert_eq!(result, Ok(10));
    assert_eq!(node.len(), 1);
    assert!(node.capacity() >= node.len());
    #[cfg(not(feature = "amortized-growth"))]
    assert_eq!(node.capacity(), 2);
    assert!(node.keys().eq([3u8]));
    assert_eq!(WellFormedChecker::check(&node), Ok(()));

    // Removing the last child releases the storage without allocating
    let result = without_memory(|| node.delete(3));
    assert_eq!(result, Ok(30));
    assert!(node.is_empty());
    assert_eq!(node.capacity(), 0);
}
