use cfg_aliases::cfg_aliases;

fn main() {
    // The script doesn't depend on our code
    println!("cargo:rerun-if-changed=build.rs");
    // But it *does* depend on cfgs!
    println!("cargo:rerun-if-env-changed=RUSTFLAGS");
    println!("cargo:rerun-if-env-changed=RUSTDOCFLAGS");
    // Baked into the default data directory.
    println!("cargo:rerun-if-env-changed=TABLETDB_DATADIR");

    // The feature is requested and the platform actually has udev (or we're documenting).
    cfg_aliases! {
        udev_enum: { all(feature = "udev", any(docsrs, target_os = "linux")) },
    }
}
