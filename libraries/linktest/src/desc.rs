use core::fmt;

/// A registered test.
///
/// Descriptors are only ever created as `static` items by [`declare!`](crate::declare),
/// so they live for the whole process and are never mutated. Every contributing
/// crate must agree on this layout, hence `repr(C)`.
#[repr(C)]
pub struct TestDesc {
    pub name: &'static str,
    pub module_path: &'static str,
    pub source_file: &'static str,
    pub line: u32,
    pub func: fn() -> bool,
}

// Records are walked with pointer arithmetic, so the stride must be exact.
const _: () = {
    let size = core::mem::size_of::<TestDesc>();
    let align = core::mem::align_of::<TestDesc>();

    assert!(size != 0, "TestDesc must not be zero-sized");
    assert!(size % align == 0, "TestDesc size must be a multiple of its alignment");
};

impl TestDesc {
    pub const fn new(
        name: &'static str,
        module_path: &'static str,
        source_file: &'static str,
        line: u32,
        func: fn() -> bool,
    ) -> Self {
        Self {
            name,
            module_path,
            source_file,
            line,
            func,
        }
    }

    /// A placeholder record that marks the boundary of a section.
    ///
    /// Sentinels are skipped during enumeration and must never be run.
    pub const fn sentinel() -> Self {
        fn never_run() -> bool {
            false
        }

        Self::new("", "", "", 0, never_run)
    }

    /// Invokes the test function and returns whether it passed.
    pub fn run(&self) -> bool {
        (self.func)()
    }

    /// Whether the test is selected by a name filter: its name contains `pattern`.
    pub fn matches(&self, pattern: &str) -> bool {
        self.name.contains(pattern)
    }

    /// `module::path::name`, used in diagnostics.
    pub fn qualified_name(&self) -> String {
        if self.module_path.is_empty() {
            self.name.to_string()
        } else {
            format!("{}::{}", self.module_path, self.name)
        }
    }
}

impl fmt::Debug for TestDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDesc")
            .field("name", &self.name)
            .field("module_path", &self.module_path)
            .field("source_file", &self.source_file)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}
