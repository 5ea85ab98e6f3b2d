/// Rend une rangée monochrome en hexadécimal majuscule.
///
/// Deux chiffres par octet, quartet de poids fort en premier, sans séparateur.
///
/// # Example
/// ```
/// use zgf_encode::hex::encode_row;
/// assert_eq!(encode_row(&[0x00, 0xab, 0xff, 0x0f]), "00ABFF0F");
/// assert_eq!(encode_row(&[]), "");
/// ```
#[inline]
#[must_use]
pub fn encode_row(row: &[u8]) -> String {
    ::hex::encode_upper(row)
}
