use crate::scanner::TARGET_EXTENSION;

/// Build the sequential file name for the 0-based `index`.
///
/// Numbers 1-99 are zero padded to three digits. From 100 on the number is
/// written as is, so names past 999 no longer sort lexicographically in
/// sequence order.
pub fn generate_file_name(index: usize) -> String {
    let n = index + 1;
    if n > 99 {
        format!("{}.{}", n, TARGET_EXTENSION)
    } else if n > 9 {
        format!("0{}.{}", n, TARGET_EXTENSION)
    } else {
        format!("00{}.{}", n, TARGET_EXTENSION)
    }
}
