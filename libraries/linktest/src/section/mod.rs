//! The registration section and the platform boundary around it.
//!
//! Each platform family realizes the same idea differently:
//!
//! - ELF targets let the linker synthesize `__start_<name>` / `__stop_<name>`
//!   for any section whose name is a valid C identifier.
//! - Mach-O has no such symbols for user sections, but the linker understands
//!   the internal `section$start$<seg>$<sect>` and `section$end$<seg>$<sect>`
//!   names, which we bind to through `link_name`.
//! - COFF merges `.name$suffix` sub-sections into `.name` in lexical suffix
//!   order, so sentinel records in `$a` and `$c` bracket the real ones in `$b`.
//!
//! Only [`bounds`] and [`declare!`](crate::declare) know which family is in use.

use core::{fmt, marker::PhantomData, mem::size_of, ptr::NonNull, slice};

use crate::TestDesc;

#[cfg(target_family = "wasm")]
compile_error!("linktest: the target has no linker section support");

#[cfg(not(any(target_vendor = "apple", windows, target_family = "wasm")))]
mod elf;
#[cfg(not(any(target_vendor = "apple", windows, target_family = "wasm")))]
use elf as current;

#[cfg(target_vendor = "apple")]
mod macho;
#[cfg(target_vendor = "apple")]
use macho as current;

#[cfg(windows)]
mod coff;
#[cfg(windows)]
use coff as current;

/// Name of the platform family the registry was built for.
pub const FAMILY: &str = current::FAMILY;

/// Returns the range of every test descriptor linked into this program.
pub fn bounds() -> SectionRange<TestDesc> {
    current::bounds()
}

/// A contiguous, read-only run of `T` records delimited by two addresses.
///
/// The range borrows memory that is immutable for the rest of the process,
/// so it can be copied and walked any number of times.
pub struct SectionRange<T: 'static> {
    first: NonNull<T>,
    len: usize,
    _marker: PhantomData<&'static [T]>,
}

// SAFETY: the range only hands out shared references to `'static` data
unsafe impl<T: Sync + 'static> Send for SectionRange<T> {}
unsafe impl<T: Sync + 'static> Sync for SectionRange<T> {}

impl<T: 'static> SectionRange<T> {
    const STRIDE: usize = {
        assert!(size_of::<T>() != 0, "section records must not be zero-sized");
        size_of::<T>()
    };

    /// Creates a range in which `start` is the first record and `stop` is one
    /// past the last record.
    ///
    /// # Safety
    ///
    /// - Every `T`-sized slot between `start` and `stop` must hold an
    ///   initialized `T` that is never mutated or freed.
    /// - `start` must be properly aligned for `T`.
    pub unsafe fn from_bounds(start: NonNull<T>, stop: NonNull<T>) -> Self {
        let distance = (stop.as_ptr() as usize).saturating_sub(start.as_ptr() as usize);

        debug_assert_eq!(
            distance % Self::STRIDE,
            0,
            "section size is not a multiple of the record size"
        );

        Self {
            first: start,
            len: distance / Self::STRIDE,
            _marker: PhantomData,
        }
    }

    /// Creates a range from a dummy start marker that immediately precedes the
    /// first real record. The marker itself is never part of the range.
    ///
    /// # Safety
    ///
    /// Same as [`from_bounds`](Self::from_bounds), applied to the records
    /// after `start_marker`.
    pub unsafe fn from_sentinels(start_marker: NonNull<T>, stop: NonNull<T>) -> Self {
        // The records after the marker are not part of its allocation as far as
        // the compiler knows, only the linker placed them there.
        let first = start_marker.as_ptr().wrapping_add(1);

        Self::from_bounds(NonNull::new_unchecked(first), stop)
    }

    pub const fn empty() -> Self {
        Self {
            first: NonNull::dangling(),
            len: 0,
            _marker: PhantomData,
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &'static [T] {
        // SAFETY: upheld by the constructors' contracts
        unsafe { slice::from_raw_parts(self.first.as_ptr(), self.len) }
    }

    pub fn iter(&self) -> slice::Iter<'static, T> {
        self.as_slice().iter()
    }
}

impl<T: 'static> Clone for SectionRange<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for SectionRange<T> {}

impl<T: 'static> From<&'static [T]> for SectionRange<T> {
    fn from(records: &'static [T]) -> Self {
        let start = NonNull::from(records).cast::<T>();

        // SAFETY: the bounds come from a live slice
        unsafe {
            let stop = NonNull::new_unchecked(start.as_ptr().add(records.len()));
            Self::from_bounds(start, stop)
        }
    }
}

impl<T: 'static> IntoIterator for &SectionRange<T> {
    type Item = &'static T;
    type IntoIter = slice::Iter<'static, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for SectionRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Declares a test descriptor and places it in the registration section.
///
/// This is what [`test`](crate::test) expands to; it can also be used
/// directly to register an existing function under any name:
///
/// ```ignore
/// fn check_parser() -> bool { true }
///
/// linktest::declare!("parser accepts empty input" => check_parser);
/// ```
#[macro_export]
macro_rules! declare {
    ($name:expr => $func:path) => {
        #[doc(hidden)]
        const _: () = {
            #[used]
            #[doc(hidden)]
            #[cfg_attr(
                not(any(target_vendor = "apple", windows)),
                unsafe(link_section = "linktest")
            )]
            #[cfg_attr(
                target_vendor = "apple",
                unsafe(link_section = "__DATA,__linktest,regular,no_dead_strip")
            )]
            #[cfg_attr(windows, unsafe(link_section = ".ltest$b"))]
            static TEST_DESC: $crate::TestDesc = $crate::TestDesc::new(
                $name,
                ::core::module_path!(),
                ::core::file!(),
                ::core::line!(),
                $func,
            );
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[repr(C)]
    #[derive(Debug, PartialEq)]
    struct Record {
        id: u64,
    }

    const fn record(id: u64) -> Record {
        Record { id }
    }

    fn ids(range: &SectionRange<Record>) -> Vec<u64> {
        range.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_from_bounds_covers_every_record() {
        static RECORDS: [Record; 3] = [record(1), record(2), record(3)];

        let range = SectionRange::from(&RECORDS[..]);

        assert_eq!(range.len(), 3);
        assert_eq!(ids(&range), vec![1, 2, 3]);
    }

    #[test]
    fn test_equal_bounds_are_empty() {
        static RECORDS: [Record; 1] = [record(1)];

        let start = NonNull::from(&RECORDS[0]);
        let range = unsafe { SectionRange::from_bounds(start, start) };

        assert!(range.is_empty());
        assert_eq!(range.iter().count(), 0);
    }

    #[test]
    fn test_stop_before_start_is_empty() {
        static RECORDS: [Record; 2] = [record(1), record(2)];

        let start = NonNull::from(&RECORDS[1]);
        let stop = NonNull::from(&RECORDS[0]);
        let range = unsafe { SectionRange::from_bounds(start, stop) };

        assert!(range.is_empty());
    }

    #[test]
    fn test_sentinels_skip_leading_marker() {
        static RECORDS: [Record; 4] = [record(0), record(10), record(20), record(0)];

        let marker = NonNull::from(&RECORDS[0]);
        let stop = NonNull::from(&RECORDS[3]);
        let range = unsafe { SectionRange::from_sentinels(marker, stop) };

        assert_eq!(range.len(), 2);
        assert_eq!(ids(&range), vec![10, 20]);
    }

    #[test]
    fn test_adjacent_sentinels_are_empty() {
        static RECORDS: [Record; 2] = [record(0), record(0)];

        let marker = NonNull::from(&RECORDS[0]);
        let stop = NonNull::from(&RECORDS[1]);
        let range = unsafe { SectionRange::from_sentinels(marker, stop) };

        assert!(range.is_empty());
        assert_eq!(ids(&range), Vec::<u64>::new());
    }

    #[test]
    fn test_range_is_restartable() {
        static RECORDS: [Record; 3] = [record(7), record(8), record(9)];

        let range = SectionRange::from(&RECORDS[..]);
        let copy = range;

        assert_eq!(ids(&range), ids(&range));
        assert_eq!(ids(&range), ids(&copy));
    }

    #[test]
    fn test_empty_range() {
        let range = SectionRange::<Record>::empty();

        assert!(range.is_empty());
        assert!(range.as_slice().is_empty());
    }

    #[test]
    fn test_platform_bounds_are_walkable() {
        // The unit test binary declares no tests, whatever the family.
        let range = bounds();

        assert!(!FAMILY.is_empty());
        assert!(range.is_empty());
        assert_eq!(range.iter().count(), 0);
    }
}
