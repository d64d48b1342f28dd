use super::SectionRange;
use crate::{symbol_ptr, TestDesc};

pub(super) const FAMILY: &str = "mach-o";

// ld64 only resolves `section$start$...` for sections that exist.
#[used]
#[unsafe(link_section = "__DATA,__linktest,regular,no_dead_strip")]
static mut ANCHOR: [TestDesc; 0] = [];

pub(super) fn bounds() -> SectionRange<TestDesc> {
    // `\x01` stops the compiler from prefixing an underscore, so the names
    // reach the linker exactly as written.
    unsafe {
        let start = symbol_ptr!("\x01section$start$__DATA$__linktest").cast::<TestDesc>();
        let stop = symbol_ptr!("\x01section$end$__DATA$__linktest").cast::<TestDesc>();

        SectionRange::from_bounds(start, stop)
    }
}
