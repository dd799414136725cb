#![allow(dead_code)]

#[path = "../../src/testing/class_builder.rs"]
mod class_builder;

pub use class_builder::ClassFileBuilder;

use std::io::Write;
use std::path::Path;

pub const PUBLIC: u16 = 0x0001;
pub const PUBLIC_STATIC: u16 = 0x0009;
pub const PUBLIC_STATIC_FINAL: u16 = 0x0019;

/// A cut-down `java.lang.Object` with its usual public surface.
pub fn object() -> ClassFileBuilder {
    ClassFileBuilder::class("java/lang/Object")
        .no_superclass()
        .method(PUBLIC, "<init>", "()V")
        .method(0x0111, "getClass", "()Ljava/lang/Class;")
        .method(PUBLIC, "hashCode", "()I")
        .method(PUBLIC, "equals", "(Ljava/lang/Object;)Z")
        .method(PUBLIC, "toString", "()Ljava/lang/String;")
        .method(0x0011, "wait", "(J)V")
        .method(0x0011, "wait", "()V")
}

/// Writes classes under `root` in class path directory layout.
pub fn write_class_dir(root: &Path, classes: &[ClassFileBuilder]) {
    for class in classes {
        let path = root.join(format!("{}.class", class.name()));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, class.build()).unwrap();
    }
}

/// Writes classes into a jar at `path`.
pub fn write_jar(path: &Path, classes: &[ClassFileBuilder]) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    zip.add_directory("META-INF/", options).unwrap();
    for class in classes {
        zip.start_file(format!("{}.class", class.name()), options)
            .unwrap();
        zip.write_all(&class.build()).unwrap();
    }
    zip.finish().unwrap();
}
