//! This module provides a macro to get a pointer to a symbol the linker defines.

/// Get a pointer to a symbol defined by the linker, in assembly or in a linker script.
/// The symbol must be defined in the global scope.
/// The macro takes a string literal as input to support symbols with special characters
/// (e.g. `$`, `\x01`), which is how linker-internal names are spelled on some platforms.
///
/// # Example
/// ```ignore
/// let start = symbol_ptr!("__start_linktest").cast::<TestDesc>();
/// ```
/// # Safety
/// Accessing the pointer to a symbol is unsafe, `unsafe` is required to call this macro.
#[doc(hidden)]
#[macro_export]
macro_rules! symbol_ptr {
    ($sym:literal) => {{
        // We use a `unsafe` function, so that the caller must call this macro within an `unsafe` block.
        #[doc(hidden)]
        #[inline(always)]
        unsafe fn __get_sym() -> ::core::ptr::NonNull<()> {
            unsafe extern "C" {
                #[doc(hidden)]
                #[allow(improper_ctypes)]
                #[link_name = $sym]
                static mut __SYM: ();
            }

            // SAFETY: the address of a linked symbol is never null
            #[allow(unused_unsafe)]
            unsafe {
                ::core::ptr::NonNull::new_unchecked(::core::ptr::addr_of_mut!(__SYM))
            }
        }

        __get_sym()
    }};
}
