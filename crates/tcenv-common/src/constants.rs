//! Toolchain sentinels and well-known variable names.

/// Name of the no-op toolchain used for software that needs no compiler stack.
pub const DUMMY_NAME: &str = "dummy";

/// Version sentinel of the dummy toolchain.
///
/// A dummy toolchain with this version loads no modules at all.
pub const DUMMY_VERSION: &str = "dummy";

/// Prefix of the alias variable exported next to every toolchain variable.
///
/// Makefiles can write `CFLAGS = $(EBVARCFLAGS)` without tripping over a
/// recursive reference to `CFLAGS`.
pub const DEFAULT_ENV_ALIAS_PREFIX: &str = "EBVAR";

/// Preprocessor flags variable.
pub const CPPFLAGS: &str = "CPPFLAGS";

/// Linker flags variable.
pub const LDFLAGS: &str = "LDFLAGS";

/// Header subdirectory below a software root.
pub const INCLUDE_SUBDIR: &str = "include";

/// Library subdirectory below a software root.
pub const LIB_SUBDIR: &str = "lib";

/// 64-bit library subdirectory below a software root.
pub const LIB64_SUBDIR: &str = "lib64";

/// Option name selecting a 32-bit build.
pub const OPTION_32BIT: &str = "32bit";
