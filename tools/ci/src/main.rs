use bitflags::bitflags;
use itertools::Itertools;
use xshell::{cmd, Shell};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Check: u32 {
        const FORMAT = 1 << 0;
        const CLIPPY = 1 << 1;
        const COMPILE = 1 << 2;
        const TEST = 1 << 3;
        const DOC_TEST = 1 << 4;
        const BENCH = 1 << 5;
    }
}

const CHECK_NAMES: [(&str, Check); 6] = [
    ("format", Check::FORMAT),
    ("clippy", Check::CLIPPY),
    ("compile", Check::COMPILE),
    ("test", Check::TEST),
    ("doctest", Check::DOC_TEST),
    ("bench", Check::BENCH),
];

fn main() {
    // When run locally, results may differ from actual CI runs triggered by
    // .github/workflows/ci.yml
    // - Official CI runs latest stable
    // - Local runs use whatever the default Rust is locally

    let args = std::env::args().skip(1).collect_vec();
    let checks = if args.is_empty() {
        Check::all()
    } else {
        args.iter()
            .map(|arg| {
                CHECK_NAMES
                    .iter()
                    .find(|(name, _)| name == arg)
                    .map(|(_, check)| *check)
                    .unwrap_or_else(|| {
                        panic!(
                            "Unknown check `{arg}`, expected one of: {}",
                            CHECK_NAMES.iter().map(|(name, _)| name).join(", ")
                        )
                    })
            })
            .fold(Check::empty(), |checks, check| checks | check)
    };

    let sh = Shell::new().expect("Failed to open a shell");

    if checks.contains(Check::FORMAT) {
        // See if any code needs to be formatted
        cmd!(sh, "cargo fmt --all -- --check")
            .run()
            .expect("Please run `cargo fmt --all` to format your code.");
    }

    if checks.contains(Check::CLIPPY) {
        // See if clippy has any complaints.
        // - Too many arguments must be ignored because systems take one parameter per input resource
        cmd!(
            sh,
            "cargo clippy --workspace --all-targets --all-features -- -D warnings -A clippy::too_many_arguments"
        )
        .run()
        .expect("Please fix `cargo clippy` errors with all features enabled.");
    }

    if checks.contains(Check::COMPILE) {
        // Check for errors with no features enabled
        cmd!(sh, "cargo check --workspace --no-default-features")
            .run()
            .expect("Please fix `cargo check` errors with no features enabled.");

        // Check for errors with default features enabled
        cmd!(sh, "cargo check --workspace")
            .run()
            .expect("Please fix `cargo check` errors with default features enabled.");
    }

    if checks.contains(Check::TEST) {
        // Run the unit and integration tests
        cmd!(sh, "cargo test --workspace --lib --tests")
            .run()
            .expect("Please fix failing tests.");
    }

    if checks.contains(Check::DOC_TEST) {
        // Run the examples in the docs and the README
        cmd!(sh, "cargo test --workspace --doc")
            .run()
            .expect("Please fix failing doc tests.");
    }

    if checks.contains(Check::BENCH) {
        // Make sure the benchmarks still build
        cmd!(sh, "cargo bench --no-run")
            .run()
            .expect("Please fix compiler errors in the benchmarks.");
    }
}
