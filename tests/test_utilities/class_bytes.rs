/// Hand-assembled compiled units
///
/// The constant pool holds one class entry per unit: the unit itself first,
/// then each reference. Nothing after `this_class` is written since the
/// dependency parser never reads further.
pub fn class_file(name: &str, references: &[&str]) -> Vec<u8> {
    let mut pool = Vec::new();
    let mut next_slot: u16 = 1;
    let mut push_class = |pool: &mut Vec<u8>, internal_name: &str| -> u16 {
        // Utf8 entry followed by the Class entry pointing at it
        pool.push(1);
        pool.extend((internal_name.len() as u16).to_be_bytes());
        pool.extend(internal_name.as_bytes());
        pool.push(7);
        pool.extend(next_slot.to_be_bytes());
        next_slot += 2;
        next_slot - 1
    };
    let this_class = push_class(&mut pool, &name.replace('.', "/"));
    for reference in references {
        push_class(&mut pool, &reference.replace('.', "/"));
    }

    let mut bytes = Vec::new();
    bytes.extend(0xCAFE_BABEu32.to_be_bytes());
    bytes.extend(0u16.to_be_bytes());
    bytes.extend(52u16.to_be_bytes());
    bytes.extend(next_slot.to_be_bytes());
    bytes.extend(pool);
    bytes.extend(0x0021u16.to_be_bytes());
    bytes.extend(this_class.to_be_bytes());
    bytes
}

/// Writes `<dir>/<package path>/<Simple>.class` for the dotted unit name.
pub fn write_class(dir: &std::path::Path, name: &str, references: &[&str]) {
    let relative = format!("{}.class", name.replace('.', "/"));
    let path = dir.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, class_file(name, references)).unwrap();
}
