use core::ptr::{addr_of, NonNull};

use super::SectionRange;
use crate::TestDesc;

pub(super) const FAMILY: &str = "coff";

// The linker merges `.ltest$a`, `.ltest$b` and `.ltest$c` into `.ltest`
// sorted by suffix, so these two records bracket every descriptor in `$b`.
#[used]
#[unsafe(link_section = ".ltest$a")]
static START: TestDesc = TestDesc::sentinel();

#[used]
#[unsafe(link_section = ".ltest$c")]
static STOP: TestDesc = TestDesc::sentinel();

pub(super) fn bounds() -> SectionRange<TestDesc> {
    unsafe {
        let start = NonNull::new_unchecked(addr_of!(START).cast_mut());
        let stop = NonNull::new_unchecked(addr_of!(STOP).cast_mut());

        SectionRange::from_sentinels(start, stop)
    }
}
