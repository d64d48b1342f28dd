use super::SectionRange;
use crate::{symbol_ptr, TestDesc};

pub(super) const FAMILY: &str = "elf";

// Keeps the section, and thereby `__start_linktest`/`__stop_linktest`, in
// existence when no test is declared anywhere. `static mut` so its section
// flags match the (relocated, writable) descriptors.
#[used]
#[unsafe(link_section = "linktest")]
static mut ANCHOR: [TestDesc; 0] = [];

pub(super) fn bounds() -> SectionRange<TestDesc> {
    unsafe {
        let start = symbol_ptr!("__start_linktest").cast::<TestDesc>();
        let stop = symbol_ptr!("__stop_linktest").cast::<TestDesc>();

        SectionRange::from_bounds(start, stop)
    }
}
