use std::{env, fs::File, io::Write, path::Path};

// Given some features, assert that AT MOST one of the features is enabled.
macro_rules! assert_unique_features {
    () => {};

    ( $first:tt $(,$rest:tt)* ) => {
        $(
            #[cfg(all(feature = $first, feature = $rest))]
            compile_error!(concat!("Features \"", $first, "\" and \"", $rest, "\" cannot be used together"));
        )*
        assert_unique_features!($($rest),*);
    };
}

assert_unique_features! {"maze-quad", "maze-single"}

fn generate_linkerscript() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let link_path = Path::new(&out_dir).join("link.x");
    let mut f = File::create(&link_path).expect("failed to create link.x");

    // code runs from memory-mapped SPI flash, data lives in on-chip SRAM
    const LINKER_SCRIPT: &str = r#"
MEMORY {
  FLASH (rx)  : ORIGIN = 0x00100000, LENGTH = 0x00400000
  RAM   (rwx) : ORIGIN = 0x00000000, LENGTH = 0x00004000
}

ENTRY(_start)

SECTIONS {
  /* reset at +0x0, IRQ vector at +0x10 */
  .text : { KEEP(*(.text.boot)) *(.text .text.*) } > FLASH
  .rodata : ALIGN(4) { *(.rodata .rodata.*) *(.srodata .srodata.*) } > FLASH

  .data : ALIGN(4) {
    __data_start = .;
    *(.data .data.*) *(.sdata .sdata.*)
    . = ALIGN(4);
    __data_end = .;
  } > RAM AT > FLASH
  __data_load = LOADADDR(.data);

  .bss (NOLOAD) : ALIGN(4) {
    __bss_start = .;
    *(.bss .bss.*) *(.sbss .sbss.*) *(COMMON)
    . = ALIGN(4);
    __bss_end = .;
  } > RAM

  _stack_start = ORIGIN(RAM) + LENGTH(RAM);

  /DISCARD/ : { *(.eh_frame) *(.eh_frame_hdr) }
}
"#;

    f.write_all(LINKER_SCRIPT.as_bytes()).unwrap();

    // Hook up the linker script
    println!("cargo:rustc-link-arg=-T{}", link_path.display());
}

fn main() {
    println!("cargo:rerun-if-env-changed=SONGPLAYER_LIB_DIR");

    // Only run for the correct target
    let target = env::var("TARGET").unwrap();
    if !target.starts_with("riscv32") {
        println!("cargo:warning=Not targeting riscv32; skipping linker script setup.");
        return;
    }

    generate_linkerscript();

    if env::var_os("CARGO_FEATURE_SONGPLAYER").is_some() {
        let dir = env::var("SONGPLAYER_LIB_DIR")
            .expect("the songplayer feature needs SONGPLAYER_LIB_DIR pointing at libsongplayer.a");
        println!("cargo:rustc-link-search=native={dir}");
        println!("cargo:rustc-link-lib=static=songplayer");
    }
}
