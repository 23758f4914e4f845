/*!
Bump allocation for AST storage.

Everything the parser allocates lives until the `BucketList` is dropped;
there's no way to free a single allocation. Only `Copy` values can be
stored, so no destructors ever need to run for the contents.
*/

use core::alloc::Layout;
use core::cell::RefCell;
use core::ptr::{self, NonNull};
use core::{cmp, slice, str};
use std::alloc::{alloc, dealloc, handle_alloc_error};

const INITIAL_BUCKET_SIZE: usize = 2048;
const BUCKET_ALIGN: usize = 16;

#[inline]
pub fn grow_array(len: usize) -> usize {
    if len > usize::MAX / 3 * 2 {
        panic!("length would probably overflow here");
    }
    return len / 2 + len;
}

struct Bucket {
    begin: NonNull<u8>,
    layout: Layout,
    bump: usize,
}

impl Bucket {
    fn new(capacity: usize) -> Self {
        let layout = match Layout::from_size_align(capacity, BUCKET_ALIGN) {
            Ok(layout) => layout,
            Err(_) => panic!("bucket of {} bytes is too large", capacity),
        };

        let begin = match NonNull::new(unsafe { alloc(layout) }) {
            Some(begin) => begin,
            None => handle_alloc_error(layout),
        };

        return Bucket {
            begin,
            layout,
            bump: 0,
        };
    }

    fn alloc(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        let base = self.begin.as_ptr() as usize;
        let offset = (base + self.bump).wrapping_neg() & (layout.align() - 1);
        let start = self.bump.checked_add(offset)?;
        let end = start.checked_add(layout.size())?;
        if end > self.layout.size() {
            return None;
        }

        self.bump = end;
        return Some(unsafe { NonNull::new_unchecked(self.begin.as_ptr().add(start)) });
    }
}

pub struct BucketList {
    buckets: RefCell<Vec<Bucket>>,
}

impl Default for BucketList {
    fn default() -> Self {
        Self::new()
    }
}

impl BucketList {
    pub fn new() -> Self {
        return Self::with_capacity(INITIAL_BUCKET_SIZE);
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = cmp::max(capacity, BUCKET_ALIGN);
        return Self {
            buckets: RefCell::new(vec![Bucket::new(capacity)]),
        };
    }

    fn alloc(&self, layout: Layout) -> NonNull<u8> {
        if layout.size() == 0 {
            // Alignments are non-zero powers of two
            return unsafe { NonNull::new_unchecked(layout.align() as *mut u8) };
        }

        let mut buckets = self.buckets.borrow_mut();
        if let Some(ptr) = buckets.last_mut().and_then(|b| b.alloc(layout)) {
            return ptr;
        }

        let prev_len = buckets.last().map(|b| b.layout.size());
        let prev_len = prev_len.unwrap_or(INITIAL_BUCKET_SIZE);
        let capacity = cmp::max(grow_array(prev_len), layout.size() + layout.align());

        let mut bucket = Bucket::new(capacity);
        let ptr = match bucket.alloc(layout) {
            Some(ptr) => ptr,
            None => panic!("fresh bucket couldn't fit an allocation of {:?}", layout),
        };

        buckets.push(bucket);
        return ptr;
    }

    pub fn add<T: Copy>(&self, t: T) -> &T {
        let location = self.alloc(Layout::new::<T>()).as_ptr() as *mut T;
        unsafe {
            ptr::write(location, t);
            return &*location;
        }
    }

    pub fn add_slice<T: Copy>(&self, values: &[T]) -> &[T] {
        if values.is_empty() {
            return &[];
        }

        let layout = match Layout::array::<T>(values.len()) {
            Ok(layout) => layout,
            Err(_) => panic!("array of {} elements is too large", values.len()),
        };

        let block = self.alloc(layout).as_ptr() as *mut T;
        unsafe {
            ptr::copy_nonoverlapping(values.as_ptr(), block, values.len());
            return slice::from_raw_parts(block, values.len());
        }
    }

    pub fn add_array<T: Copy>(&self, vec: Vec<T>) -> &[T] {
        return self.add_slice(&vec);
    }

    pub fn add_str(&self, values: &str) -> &str {
        let bytes = self.add_slice(values.as_bytes());
        return unsafe { str::from_utf8_unchecked(bytes) };
    }

    /// Total bytes handed out so far, including alignment padding.
    pub fn used(&self) -> usize {
        self.buckets.borrow().iter().map(|b| b.bump).sum()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.borrow().len()
    }
}

impl Drop for BucketList {
    fn drop(&mut self) {
        for bucket in self.buckets.get_mut().drain(..) {
            unsafe { dealloc(bucket.begin.as_ptr(), bucket.layout) };
        }
    }
}

#[test]
fn test_bucket_list() {
    let bucket_list = BucketList::with_capacity(24);
    let num = bucket_list.add(12u64);
    let arrays: Vec<&[u32]> = (0..9)
        .map(|_| bucket_list.add_array(vec![12, 12, 31, 4123, 123, 5, 14, 5, 134, 5]))
        .collect();

    assert_eq!(*num, 12);
    for array in arrays {
        assert_eq!(array, &[12, 12, 31, 4123, 123, 5, 14, 5, 134, 5]);
    }

    assert!(bucket_list.bucket_count() > 1);
}

#[test]
fn test_bucket_alignment() {
    let bucket_list = BucketList::with_capacity(64);
    bucket_list.add(1u8);
    let wide = bucket_list.add(0xdead_beef_u64);
    bucket_list.add_str("abc");
    let pair = bucket_list.add((7u128, 3u8));

    assert_eq!(wide as *const u64 as usize % core::mem::align_of::<u64>(), 0);
    assert_eq!(pair as *const (u128, u8) as usize % core::mem::align_of::<u128>(), 0);
    assert_eq!(*wide, 0xdead_beef);
    assert_eq!(*pair, (7, 3));
}

#[test]
fn test_bucket_empty_and_zero_sized() {
    let bucket_list = BucketList::new();
    let empty: &[u32] = bucket_list.add_array(Vec::new());
    let _unit: &() = bucket_list.add(());

    assert!(empty.is_empty());
    assert_eq!(bucket_list.used(), 0);
}
