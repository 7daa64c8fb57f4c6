#![forbid(unsafe_code)]

//! Grapheme_Cluster_Break and Extended_Pictographic range tables.
//!
//! Derived from the Unicode Character Database, version 14.0.0
//! (`GraphemeBreakProperty.txt` derivation rules and `emoji-data.txt`).
//! Precomposed Hangul syllables (U+AC00..=U+D7A3) are omitted here and
//! resolved arithmetically by the classifier. Do not edit by hand.

use crate::break_class::BreakClass;

/// Unicode version the tables were derived from.
pub const UNICODE_VERSION: (u8, u8, u8) = (14, 0, 0);

/// Sorted, non-overlapping `(first, last, class)` ranges. Code points not
/// covered here are [`BreakClass::Other`].
#[rustfmt::skip]
pub(crate) static GRAPHEME_CLUSTER_BREAK: &[(u32, u32, BreakClass)] = &[
    (0x0000, 0x0009, BreakClass::Control),
    (0x000A, 0x000A, BreakClass::Lf),
    (0x000B, 0x000C, BreakClass::Control),
    (0x000D, 0x000D, BreakClass::Cr),
    (0x000E, 0x001F, BreakClass::Control),
    (0x007F, 0x009F, BreakClass::Control),
    (0x00AD, 0x00AD, BreakClass::Control),
    (0x0300, 0x036F, BreakClass::Extend),
    (0x0483, 0x0489, BreakClass::Extend),
    (0x0591, 0x05BD, BreakClass::Extend),
    (0x05BF, 0x05BF, BreakClass::Extend),
    (0x05C1, 0x05C2, BreakClass::Extend),
    (0x05C4, 0x05C5, BreakClass::Extend),
    (0x05C7, 0x05C7, BreakClass::Extend),
    (0x0600, 0x0605, BreakClass::Prepend),
    (0x0610, 0x061A, BreakClass::Extend),
    (0x061C, 0x061C, BreakClass::Control),
    (0x064B, 0x065F, BreakClass::Extend),
    (0x0670, 0x0670, BreakClass::Extend),
    (0x06D6, 0x06DC, BreakClass::Extend),
    (0x06DD, 0x06DD, BreakClass::Prepend),
    (0x06DF, 0x06E4, BreakClass::Extend),
    (0x06E7, 0x06E8, BreakClass::Extend),
    (0x06EA, 0x06ED, BreakClass::Extend),
    (0x070F, 0x070F, BreakClass::Prepend),
    (0x0711, 0x0711, BreakClass::Extend),
    (0x0730, 0x074A, BreakClass::Extend),
    (0x07A6, 0x07B0, BreakClass::Extend),
    (0x07EB, 0x07F3, BreakClass::Extend),
    (0x07FD, 0x07FD, BreakClass::Extend),
    (0x0816, 0x0819, BreakClass::Extend),
    (0x081B, 0x0823, BreakClass::Extend),
    (0x0825, 0x0827, BreakClass::Extend),
    (0x0829, 0x082D, BreakClass::Extend),
    (0x0859, 0x085B, BreakClass::Extend),
    (0x0890, 0x0891, BreakClass::Prepend),
    (0x0898, 0x089F, BreakClass::Extend),
    (0x08CA, 0x08E1, BreakClass::Extend),
    (0x08E2, 0x08E2, BreakClass::Prepend),
    (0x08E3, 0x0902, BreakClass::Extend),
    (0x0903, 0x0903, BreakClass::SpacingMark),
    (0x093A, 0x093A, BreakClass::Extend),
    (0x093B, 0x093B, BreakClass::SpacingMark),
    (0x093C, 0x093C, BreakClass::Extend),
    (0x093E, 0x0940, BreakClass::SpacingMark),
    (0x0941, 0x0948, BreakClass::Extend),
    (0x0949, 0x094C, BreakClass::SpacingMark),
    (0x094D, 0x094D, BreakClass::Extend),
    (0x094E, 0x094F, BreakClass::SpacingMark),
    (0x0951, 0x0957, BreakClass::Extend),
    (0x0962, 0x0963, BreakClass::Extend),
    (0x0981, 0x0981, BreakClass::Extend),
    (0x0982, 0x0983, BreakClass::SpacingMark),
    (0x09BC, 0x09BC, BreakClass::Extend),
    (0x09BE, 0x09BE, BreakClass::Extend),
    (0x09BF, 0x09C0, BreakClass::SpacingMark),
    (0x09C1, 0x09C4, BreakClass::Extend),
    (0x09C7, 0x09C8, BreakClass::SpacingMark),
    (0x09CB, 0x09CC, BreakClass::SpacingMark),
    (0x09CD, 0x09CD, BreakClass::Extend),
    (0x09D7, 0x09D7, BreakClass::Extend),
    (0x09E2, 0x09E3, BreakClass::Extend),
    (0x09FE, 0x09FE, BreakClass::Extend),
    (0x0A01, 0x0A02, BreakClass::Extend),
    (0x0A03, 0x0A03, BreakClass::SpacingMark),
    (0x0A3C, 0x0A3C, BreakClass::Extend),
    (0x0A3E, 0x0A40, BreakClass::SpacingMark),
    (0x0A41, 0x0A42, BreakClass::Extend),
    (0x0A47, 0x0A48, BreakClass::Extend),
    (0x0A4B, 0x0A4D, BreakClass::Extend),
    (0x0A51, 0x0A51, BreakClass::Extend),
    (0x0A70, 0x0A71, BreakClass::Extend),
    (0x0A75, 0x0A75, BreakClass::Extend),
    (0x0A81, 0x0A82, BreakClass::Extend),
    (0x0A83, 0x0A83, BreakClass::SpacingMark),
    (0x0ABC, 0x0ABC, BreakClass::Extend),
    (0x0ABE, 0x0AC0, BreakClass::SpacingMark),
    (0x0AC1, 0x0AC5, BreakClass::Extend),
    (0x0AC7, 0x0AC8, BreakClass::Extend),
    (0x0AC9, 0x0AC9, BreakClass::SpacingMark),
    (0x0ACB, 0x0ACC, BreakClass::SpacingMark),
    (0x0ACD, 0x0ACD, BreakClass::Extend),
    (0x0AE2, 0x0AE3, BreakClass::Extend),
    (0x0AFA, 0x0AFF, BreakClass::Extend),
    (0x0B01, 0x0B01, BreakClass::Extend),
    (0x0B02, 0x0B03, BreakClass::SpacingMark),
    (0x0B3C, 0x0B3C, BreakClass::Extend),
    (0x0B3E, 0x0B3F, BreakClass::Extend),
    (0x0B40, 0x0B40, BreakClass::SpacingMark),
    (0x0B41, 0x0B44, BreakClass::Extend),
    (0x0B47, 0x0B48, BreakClass::SpacingMark),
    (0x0B4B, 0x0B4C, BreakClass::SpacingMark),
    (0x0B4D, 0x0B4D, BreakClass::Extend),
    (0x0B55, 0x0B57, BreakClass::Extend),
    (0x0B62, 0x0B63, BreakClass::Extend),
    (0x0B82, 0x0B82, BreakClass::Extend),
    (0x0BBE, 0x0BBE, BreakClass::Extend),
    (0x0BBF, 0x0BBF, BreakClass::SpacingMark),
    (0x0BC0, 0x0BC0, BreakClass::Extend),
    (0x0BC1, 0x0BC2, BreakClass::SpacingMark),
    (0x0BC6, 0x0BC8, BreakClass::SpacingMark),
    (0x0BCA, 0x0BCC, BreakClass::SpacingMark),
    (0x0BCD, 0x0BCD, BreakClass::Extend),
    (0x0BD7, 0x0BD7, BreakClass::Extend),
    (0x0C00, 0x0C00, BreakClass::Extend),
    (0x0C01, 0x0C03, BreakClass::SpacingMark),
    (0x0C04, 0x0C04, BreakClass::Extend),
    (0x0C3C, 0x0C3C, BreakClass::Extend),
    (0x0C3E, 0x0C40, BreakClass::Extend),
    (0x0C41, 0x0C44, BreakClass::SpacingMark),
    (0x0C46, 0x0C48, BreakClass::Extend),
    (0x0C4A, 0x0C4D, BreakClass::Extend),
    (0x0C55, 0x0C56, BreakClass::Extend),
    (0x0C62, 0x0C63, BreakClass::Extend),
    (0x0C81, 0x0C81, BreakClass::Extend),
    (0x0C82, 0x0C83, BreakClass::SpacingMark),
    (0x0CBC, 0x0CBC, BreakClass::Extend),
    (0x0CBE, 0x0CBE, BreakClass::SpacingMark),
    (0x0CBF, 0x0CBF, BreakClass::Extend),
    (0x0CC0, 0x0CC1, BreakClass::SpacingMark),
    (0x0CC2, 0x0CC2, BreakClass::Extend),
    (0x0CC3, 0x0CC4, BreakClass::SpacingMark),
    (0x0CC6, 0x0CC6, BreakClass::Extend),
    (0x0CC7, 0x0CC8, BreakClass::SpacingMark),
    (0x0CCA, 0x0CCB, BreakClass::SpacingMark),
    (0x0CCC, 0x0CCD, BreakClass::Extend),
    (0x0CD5, 0x0CD6, BreakClass::Extend),
    (0x0CE2, 0x0CE3, BreakClass::Extend),
    (0x0D00, 0x0D01, BreakClass::Extend),
    (0x0D02, 0x0D03, BreakClass::SpacingMark),
    (0x0D3B, 0x0D3C, BreakClass::Extend),
    (0x0D3E, 0x0D3E, BreakClass::Extend),
    (0x0D3F, 0x0D40, BreakClass::SpacingMark),
    (0x0D41, 0x0D44, BreakClass::Extend),
    (0x0D46, 0x0D48, BreakClass::SpacingMark),
    (0x0D4A, 0x0D4C, BreakClass::SpacingMark),
    (0x0D4D, 0x0D4D, BreakClass::Extend),
    (0x0D4E, 0x0D4E, BreakClass::Prepend),
    (0x0D57, 0x0D57, BreakClass::Extend),
    (0x0D62, 0x0D63, BreakClass::Extend),
    (0x0D81, 0x0D81, BreakClass::Extend),
    (0x0D82, 0x0D83, BreakClass::SpacingMark),
    (0x0DCA, 0x0DCA, BreakClass::Extend),
    (0x0DCF, 0x0DCF, BreakClass::Extend),
    (0x0DD0, 0x0DD1, BreakClass::SpacingMark),
    (0x0DD2, 0x0DD4, BreakClass::Extend),
    (0x0DD6, 0x0DD6, BreakClass::Extend),
    (0x0DD8, 0x0DDE, BreakClass::SpacingMark),
    (0x0DDF, 0x0DDF, BreakClass::Extend),
    (0x0DF2, 0x0DF3, BreakClass::SpacingMark),
    (0x0E31, 0x0E31, BreakClass::Extend),
    (0x0E33, 0x0E33, BreakClass::SpacingMark),
    (0x0E34, 0x0E3A, BreakClass::Extend),
    (0x0E47, 0x0E4E, BreakClass::Extend),
    (0x0EB1, 0x0EB1, BreakClass::Extend),
    (0x0EB3, 0x0EB3, BreakClass::SpacingMark),
    (0x0EB4, 0x0EBC, BreakClass::Extend),
    (0x0EC8, 0x0ECD, BreakClass::Extend),
    (0x0F18, 0x0F19, BreakClass::Extend),
    (0x0F35, 0x0F35, BreakClass::Extend),
    (0x0F37, 0x0F37, BreakClass::Extend),
    (0x0F39, 0x0F39, BreakClass::Extend),
    (0x0F3E, 0x0F3F, BreakClass::SpacingMark),
    (0x0F71, 0x0F7E, BreakClass::Extend),
    (0x0F7F, 0x0F7F, BreakClass::SpacingMark),
    (0x0F80, 0x0F84, BreakClass::Extend),
    (0x0F86, 0x0F87, BreakClass::Extend),
    (0x0F8D, 0x0F97, BreakClass::Extend),
    (0x0F99, 0x0FBC, BreakClass::Extend),
    (0x0FC6, 0x0FC6, BreakClass::Extend),
    (0x102D, 0x1030, BreakClass::Extend),
    (0x1031, 0x1031, BreakClass::SpacingMark),
    (0x1032, 0x1037, BreakClass::Extend),
    (0x1039, 0x103A, BreakClass::Extend),
    (0x103B, 0x103C, BreakClass::SpacingMark),
    (0x103D, 0x103E, BreakClass::Extend),
    (0x1056, 0x1057, BreakClass::SpacingMark),
    (0x1058, 0x1059, BreakClass::Extend),
    (0x105E, 0x1060, BreakClass::Extend),
    (0x1071, 0x1074, BreakClass::Extend),
    (0x1082, 0x1082, BreakClass::Extend),
    (0x1084, 0x1084, BreakClass::SpacingMark),
    (0x1085, 0x1086, BreakClass::Extend),
    (0x108D, 0x108D, BreakClass::Extend),
    (0x109D, 0x109D, BreakClass::Extend),
    (0x1100, 0x115F, BreakClass::L),
    (0x1160, 0x11A7, BreakClass::V),
    (0x11A8, 0x11FF, BreakClass::T),
    (0x135D, 0x135F, BreakClass::Extend),
    (0x1712, 0x1714, BreakClass::Extend),
    (0x1715, 0x1715, BreakClass::SpacingMark),
    (0x1732, 0x1733, BreakClass::Extend),
    (0x1734, 0x1734, BreakClass::SpacingMark),
    (0x1752, 0x1753, BreakClass::Extend),
    (0x1772, 0x1773, BreakClass::Extend),
    (0x17B4, 0x17B5, BreakClass::Extend),
    (0x17B6, 0x17B6, BreakClass::SpacingMark),
    (0x17B7, 0x17BD, BreakClass::Extend),
    (0x17BE, 0x17C5, BreakClass::SpacingMark),
    (0x17C6, 0x17C6, BreakClass::Extend),
    (0x17C7, 0x17C8, BreakClass::SpacingMark),
    (0x17C9, 0x17D3, BreakClass::Extend),
    (0x17DD, 0x17DD, BreakClass::Extend),
    (0x180B, 0x180D, BreakClass::Extend),
    (0x180E, 0x180E, BreakClass::Control),
    (0x180F, 0x180F, BreakClass::Extend),
    (0x1885, 0x1886, BreakClass::Extend),
    (0x18A9, 0x18A9, BreakClass::Extend),
    (0x1920, 0x1922, BreakClass::Extend),
    (0x1923, 0x1926, BreakClass::SpacingMark),
    (0x1927, 0x1928, BreakClass::Extend),
    (0x1929, 0x192B, BreakClass::SpacingMark),
    (0x1930, 0x1931, BreakClass::SpacingMark),
    (0x1932, 0x1932, BreakClass::Extend),
    (0x1933, 0x1938, BreakClass::SpacingMark),
    (0x1939, 0x193B, BreakClass::Extend),
    (0x1A17, 0x1A18, BreakClass::Extend),
    (0x1A19, 0x1A1A, BreakClass::SpacingMark),
    (0x1A1B, 0x1A1B, BreakClass::Extend),
    (0x1A55, 0x1A55, BreakClass::SpacingMark),
    (0x1A56, 0x1A56, BreakClass::Extend),
    (0x1A57, 0x1A57, BreakClass::SpacingMark),
    (0x1A58, 0x1A5E, BreakClass::Extend),
    (0x1A60, 0x1A60, BreakClass::Extend),
    (0x1A62, 0x1A62, BreakClass::Extend),
    (0x1A65, 0x1A6C, BreakClass::Extend),
    (0x1A6D, 0x1A72, BreakClass::SpacingMark),
    (0x1A73, 0x1A7C, BreakClass::Extend),
    (0x1A7F, 0x1A7F, BreakClass::Extend),
    (0x1AB0, 0x1ACE, BreakClass::Extend),
    (0x1B00, 0x1B03, BreakClass::Extend),
    (0x1B04, 0x1B04, BreakClass::SpacingMark),
    (0x1B34, 0x1B3A, BreakClass::Extend),
    (0x1B3B, 0x1B3B, BreakClass::SpacingMark),
    (0x1B3C, 0x1B3C, BreakClass::Extend),
    (0x1B3D, 0x1B41, BreakClass::SpacingMark),
    (0x1B42, 0x1B42, BreakClass::Extend),
    (0x1B43, 0x1B44, BreakClass::SpacingMark),
    (0x1B6B, 0x1B73, BreakClass::Extend),
    (0x1B80, 0x1B81, BreakClass::Extend),
    (0x1B82, 0x1B82, BreakClass::SpacingMark),
    (0x1BA1, 0x1BA1, BreakClass::SpacingMark),
    (0x1BA2, 0x1BA5, BreakClass::Extend),
    (0x1BA6, 0x1BA7, BreakClass::SpacingMark),
    (0x1BA8, 0x1BA9, BreakClass::Extend),
    (0x1BAA, 0x1BAA, BreakClass::SpacingMark),
    (0x1BAB, 0x1BAD, BreakClass::Extend),
    (0x1BE6, 0x1BE6, BreakClass::Extend),
    (0x1BE7, 0x1BE7, BreakClass::SpacingMark),
    (0x1BE8, 0x1BE9, BreakClass::Extend),
    (0x1BEA, 0x1BEC, BreakClass::SpacingMark),
    (0x1BED, 0x1BED, BreakClass::Extend),
    (0x1BEE, 0x1BEE, BreakClass::SpacingMark),
    (0x1BEF, 0x1BF1, BreakClass::Extend),
    (0x1BF2, 0x1BF3, BreakClass::SpacingMark),
    (0x1C24, 0x1C2B, BreakClass::SpacingMark),
    (0x1C2C, 0x1C33, BreakClass::Extend),
    (0x1C34, 0x1C35, BreakClass::SpacingMark),
    (0x1C36, 0x1C37, BreakClass::Extend),
    (0x1CD0, 0x1CD2, BreakClass::Extend),
    (0x1CD4, 0x1CE0, BreakClass::Extend),
    (0x1CE1, 0x1CE1, BreakClass::SpacingMark),
    (0x1CE2, 0x1CE8, BreakClass::Extend),
    (0x1CED, 0x1CED, BreakClass::Extend),
    (0x1CF4, 0x1CF4, BreakClass::Extend),
    (0x1CF7, 0x1CF7, BreakClass::SpacingMark),
    (0x1CF8, 0x1CF9, BreakClass::Extend),
    (0x1DC0, 0x1DFF, BreakClass::Extend),
    (0x200B, 0x200B, BreakClass::Control),
    (0x200C, 0x200C, BreakClass::Extend),
    (0x200D, 0x200D, BreakClass::Zwj),
    (0x200E, 0x200F, BreakClass::Control),
    (0x2028, 0x202E, BreakClass::Control),
    (0x2060, 0x206F, BreakClass::Control),
    (0x20D0, 0x20F0, BreakClass::Extend),
    (0x2CEF, 0x2CF1, BreakClass::Extend),
    (0x2D7F, 0x2D7F, BreakClass::Extend),
    (0x2DE0, 0x2DFF, BreakClass::Extend),
    (0x302A, 0x302F, BreakClass::Extend),
    (0x3099, 0x309A, BreakClass::Extend),
    (0xA66F, 0xA672, BreakClass::Extend),
    (0xA674, 0xA67D, BreakClass::Extend),
    (0xA69E, 0xA69F, BreakClass::Extend),
    (0xA6F0, 0xA6F1, BreakClass::Extend),
    (0xA802, 0xA802, BreakClass::Extend),
    (0xA806, 0xA806, BreakClass::Extend),
    (0xA80B, 0xA80B, BreakClass::Extend),
    (0xA823, 0xA824, BreakClass::SpacingMark),
    (0xA825, 0xA826, BreakClass::Extend),
    (0xA827, 0xA827, BreakClass::SpacingMark),
    (0xA82C, 0xA82C, BreakClass::Extend),
    (0xA880, 0xA881, BreakClass::SpacingMark),
    (0xA8B4, 0xA8C3, BreakClass::SpacingMark),
    (0xA8C4, 0xA8C5, BreakClass::Extend),
    (0xA8E0, 0xA8F1, BreakClass::Extend),
    (0xA8FF, 0xA8FF, BreakClass::Extend),
    (0xA926, 0xA92D, BreakClass::Extend),
    (0xA947, 0xA951, BreakClass::Extend),
    (0xA952, 0xA953, BreakClass::SpacingMark),
    (0xA960, 0xA97C, BreakClass::L),
    (0xA980, 0xA982, BreakClass::Extend),
    (0xA983, 0xA983, BreakClass::SpacingMark),
    (0xA9B3, 0xA9B3, BreakClass::Extend),
    (0xA9B4, 0xA9B5, BreakClass::SpacingMark),
    (0xA9B6, 0xA9B9, BreakClass::Extend),
    (0xA9BA, 0xA9BB, BreakClass::SpacingMark),
    (0xA9BC, 0xA9BD, BreakClass::Extend),
    (0xA9BE, 0xA9C0, BreakClass::SpacingMark),
    (0xA9E5, 0xA9E5, BreakClass::Extend),
    (0xAA29, 0xAA2E, BreakClass::Extend),
    (0xAA2F, 0xAA30, BreakClass::SpacingMark),
    (0xAA31, 0xAA32, BreakClass::Extend),
    (0xAA33, 0xAA34, BreakClass::SpacingMark),
    (0xAA35, 0xAA36, BreakClass::Extend),
    (0xAA43, 0xAA43, BreakClass::Extend),
    (0xAA4C, 0xAA4C, BreakClass::Extend),
    (0xAA4D, 0xAA4D, BreakClass::SpacingMark),
    (0xAA7C, 0xAA7C, BreakClass::Extend),
    (0xAAB0, 0xAAB0, BreakClass::Extend),
    (0xAAB2, 0xAAB4, BreakClass::Extend),
    (0xAAB7, 0xAAB8, BreakClass::Extend),
    (0xAABE, 0xAABF, BreakClass::Extend),
    (0xAAC1, 0xAAC1, BreakClass::Extend),
    (0xAAEB, 0xAAEB, BreakClass::SpacingMark),
    (0xAAEC, 0xAAED, BreakClass::Extend),
    (0xAAEE, 0xAAEF, BreakClass::SpacingMark),
    (0xAAF5, 0xAAF5, BreakClass::SpacingMark),
    (0xAAF6, 0xAAF6, BreakClass::Extend),
    (0xABE3, 0xABE4, BreakClass::SpacingMark),
    (0xABE5, 0xABE5, BreakClass::Extend),
    (0xABE6, 0xABE7, BreakClass::SpacingMark),
    (0xABE8, 0xABE8, BreakClass::Extend),
    (0xABE9, 0xABEA, BreakClass::SpacingMark),
    (0xABEC, 0xABEC, BreakClass::SpacingMark),
    (0xABED, 0xABED, BreakClass::Extend),
    (0xD7B0, 0xD7C6, BreakClass::V),
    (0xD7CB, 0xD7FB, BreakClass::T),
    (0xD800, 0xDFFF, BreakClass::Control),
    (0xFB1E, 0xFB1E, BreakClass::Extend),
    (0xFE00, 0xFE0F, BreakClass::Extend),
    (0xFE20, 0xFE2F, BreakClass::Extend),
    (0xFEFF, 0xFEFF, BreakClass::Control),
    (0xFF9E, 0xFF9F, BreakClass::Extend),
    (0xFFF0, 0xFFFB, BreakClass::Control),
    (0x101FD, 0x101FD, BreakClass::Extend),
    (0x102E0, 0x102E0, BreakClass::Extend),
    (0x10376, 0x1037A, BreakClass::Extend),
    (0x10A01, 0x10A03, BreakClass::Extend),
    (0x10A05, 0x10A06, BreakClass::Extend),
    (0x10A0C, 0x10A0F, BreakClass::Extend),
    (0x10A38, 0x10A3A, BreakClass::Extend),
    (0x10A3F, 0x10A3F, BreakClass::Extend),
    (0x10AE5, 0x10AE6, BreakClass::Extend),
    (0x10D24, 0x10D27, BreakClass::Extend),
    (0x10EAB, 0x10EAC, BreakClass::Extend),
    (0x10F46, 0x10F50, BreakClass::Extend),
    (0x10F82, 0x10F85, BreakClass::Extend),
    (0x11000, 0x11000, BreakClass::SpacingMark),
    (0x11001, 0x11001, BreakClass::Extend),
    (0x11002, 0x11002, BreakClass::SpacingMark),
    (0x11038, 0x11046, BreakClass::Extend),
    (0x11070, 0x11070, BreakClass::Extend),
    (0x11073, 0x11074, BreakClass::Extend),
    (0x1107F, 0x11081, BreakClass::Extend),
    (0x11082, 0x11082, BreakClass::SpacingMark),
    (0x110B0, 0x110B2, BreakClass::SpacingMark),
    (0x110B3, 0x110B6, BreakClass::Extend),
    (0x110B7, 0x110B8, BreakClass::SpacingMark),
    (0x110B9, 0x110BA, BreakClass::Extend),
    (0x110BD, 0x110BD, BreakClass::Prepend),
    (0x110C2, 0x110C2, BreakClass::Extend),
    (0x110CD, 0x110CD, BreakClass::Prepend),
    (0x11100, 0x11102, BreakClass::Extend),
    (0x11127, 0x1112B, BreakClass::Extend),
    (0x1112C, 0x1112C, BreakClass::SpacingMark),
    (0x1112D, 0x11134, BreakClass::Extend),
    (0x11145, 0x11146, BreakClass::SpacingMark),
    (0x11173, 0x11173, BreakClass::Extend),
    (0x11180, 0x11181, BreakClass::Extend),
    (0x11182, 0x11182, BreakClass::SpacingMark),
    (0x111B3, 0x111B5, BreakClass::SpacingMark),
    (0x111B6, 0x111BE, BreakClass::Extend),
    (0x111BF, 0x111C0, BreakClass::SpacingMark),
    (0x111C2, 0x111C3, BreakClass::Prepend),
    (0x111C9, 0x111CC, BreakClass::Extend),
    (0x111CE, 0x111CE, BreakClass::SpacingMark),
    (0x111CF, 0x111CF, BreakClass::Extend),
    (0x1122C, 0x1122E, BreakClass::SpacingMark),
    (0x1122F, 0x11231, BreakClass::Extend),
    (0x11232, 0x11233, BreakClass::SpacingMark),
    (0x11234, 0x11234, BreakClass::Extend),
    (0x11235, 0x11235, BreakClass::SpacingMark),
    (0x11236, 0x11237, BreakClass::Extend),
    (0x1123E, 0x1123E, BreakClass::Extend),
    (0x112DF, 0x112DF, BreakClass::Extend),
    (0x112E0, 0x112E2, BreakClass::SpacingMark),
    (0x112E3, 0x112EA, BreakClass::Extend),
    (0x11300, 0x11301, BreakClass::Extend),
    (0x11302, 0x11303, BreakClass::SpacingMark),
    (0x1133B, 0x1133C, BreakClass::Extend),
    (0x1133E, 0x1133E, BreakClass::Extend),
    (0x1133F, 0x1133F, BreakClass::SpacingMark),
    (0x11340, 0x11340, BreakClass::Extend),
    (0x11341, 0x11344, BreakClass::SpacingMark),
    (0x11347, 0x11348, BreakClass::SpacingMark),
    (0x1134B, 0x1134D, BreakClass::SpacingMark),
    (0x11357, 0x11357, BreakClass::Extend),
    (0x11362, 0x11363, BreakClass::SpacingMark),
    (0x11366, 0x1136C, BreakClass::Extend),
    (0x11370, 0x11374, BreakClass::Extend),
    (0x11435, 0x11437, BreakClass::SpacingMark),
    (0x11438, 0x1143F, BreakClass::Extend),
    (0x11440, 0x11441, BreakClass::SpacingMark),
    (0x11442, 0x11444, BreakClass::Extend),
    (0x11445, 0x11445, BreakClass::SpacingMark),
    (0x11446, 0x11446, BreakClass::Extend),
    (0x1145E, 0x1145E, BreakClass::Extend),
    (0x114B0, 0x114B0, BreakClass::Extend),
    (0x114B1, 0x114B2, BreakClass::SpacingMark),
    (0x114B3, 0x114B8, BreakClass::Extend),
    (0x114B9, 0x114B9, BreakClass::SpacingMark),
    (0x114BA, 0x114BA, BreakClass::Extend),
    (0x114BB, 0x114BC, BreakClass::SpacingMark),
    (0x114BD, 0x114BD, BreakClass::Extend),
    (0x114BE, 0x114BE, BreakClass::SpacingMark),
    (0x114BF, 0x114C0, BreakClass::Extend),
    (0x114C1, 0x114C1, BreakClass::SpacingMark),
    (0x114C2, 0x114C3, BreakClass::Extend),
    (0x115AF, 0x115AF, BreakClass::Extend),
    (0x115B0, 0x115B1, BreakClass::SpacingMark),
    (0x115B2, 0x115B5, BreakClass::Extend),
    (0x115B8, 0x115BB, BreakClass::SpacingMark),
    (0x115BC, 0x115BD, BreakClass::Extend),
    (0x115BE, 0x115BE, BreakClass::SpacingMark),
    (0x115BF, 0x115C0, BreakClass::Extend),
    (0x115DC, 0x115DD, BreakClass::Extend),
    (0x11630, 0x11632, BreakClass::SpacingMark),
    (0x11633, 0x1163A, BreakClass::Extend),
    (0x1163B, 0x1163C, BreakClass::SpacingMark),
    (0x1163D, 0x1163D, BreakClass::Extend),
    (0x1163E, 0x1163E, BreakClass::SpacingMark),
    (0x1163F, 0x11640, BreakClass::Extend),
    (0x116AB, 0x116AB, BreakClass::Extend),
    (0x116AC, 0x116AC, BreakClass::SpacingMark),
    (0x116AD, 0x116AD, BreakClass::Extend),
    (0x116AE, 0x116AF, BreakClass::SpacingMark),
    (0x116B0, 0x116B5, BreakClass::Extend),
    (0x116B6, 0x116B6, BreakClass::SpacingMark),
    (0x116B7, 0x116B7, BreakClass::Extend),
    (0x1171D, 0x1171F, BreakClass::Extend),
    (0x11722, 0x11725, BreakClass::Extend),
    (0x11726, 0x11726, BreakClass::SpacingMark),
    (0x11727, 0x1172B, BreakClass::Extend),
    (0x1182C, 0x1182E, BreakClass::SpacingMark),
    (0x1182F, 0x11837, BreakClass::Extend),
    (0x11838, 0x11838, BreakClass::SpacingMark),
    (0x11839, 0x1183A, BreakClass::Extend),
    (0x11930, 0x11930, BreakClass::Extend),
    (0x11931, 0x11935, BreakClass::SpacingMark),
    (0x11937, 0x11938, BreakClass::SpacingMark),
    (0x1193B, 0x1193C, BreakClass::Extend),
    (0x1193D, 0x1193D, BreakClass::SpacingMark),
    (0x1193E, 0x1193E, BreakClass::Extend),
    (0x1193F, 0x1193F, BreakClass::Prepend),
    (0x11940, 0x11940, BreakClass::SpacingMark),
    (0x11941, 0x11941, BreakClass::Prepend),
    (0x11942, 0x11942, BreakClass::SpacingMark),
    (0x11943, 0x11943, BreakClass::Extend),
    (0x119D1, 0x119D3, BreakClass::SpacingMark),
    (0x119D4, 0x119D7, BreakClass::Extend),
    (0x119DA, 0x119DB, BreakClass::Extend),
    (0x119DC, 0x119DF, BreakClass::SpacingMark),
    (0x119E0, 0x119E0, BreakClass::Extend),
    (0x119E4, 0x119E4, BreakClass::SpacingMark),
    (0x11A01, 0x11A0A, BreakClass::Extend),
    (0x11A33, 0x11A38, BreakClass::Extend),
    (0x11A39, 0x11A39, BreakClass::SpacingMark),
    (0x11A3A, 0x11A3A, BreakClass::Prepend),
    (0x11A3B, 0x11A3E, BreakClass::Extend),
    (0x11A47, 0x11A47, BreakClass::Extend),
    (0x11A51, 0x11A56, BreakClass::Extend),
    (0x11A57, 0x11A58, BreakClass::SpacingMark),
    (0x11A59, 0x11A5B, BreakClass::Extend),
    (0x11A84, 0x11A89, BreakClass::Prepend),
    (0x11A8A, 0x11A96, BreakClass::Extend),
    (0x11A97, 0x11A97, BreakClass::SpacingMark),
    (0x11A98, 0x11A99, BreakClass::Extend),
    (0x11C2F, 0x11C2F, BreakClass::SpacingMark),
    (0x11C30, 0x11C36, BreakClass::Extend),
    (0x11C38, 0x11C3D, BreakClass::Extend),
    (0x11C3E, 0x11C3E, BreakClass::SpacingMark),
    (0x11C3F, 0x11C3F, BreakClass::Extend),
    (0x11C92, 0x11CA7, BreakClass::Extend),
    (0x11CA9, 0x11CA9, BreakClass::SpacingMark),
    (0x11CAA, 0x11CB0, BreakClass::Extend),
    (0x11CB1, 0x11CB1, BreakClass::SpacingMark),
    (0x11CB2, 0x11CB3, BreakClass::Extend),
    (0x11CB4, 0x11CB4, BreakClass::SpacingMark),
    (0x11CB5, 0x11CB6, BreakClass::Extend),
    (0x11D31, 0x11D36, BreakClass::Extend),
    (0x11D3A, 0x11D3A, BreakClass::Extend),
    (0x11D3C, 0x11D3D, BreakClass::Extend),
    (0x11D3F, 0x11D45, BreakClass::Extend),
    (0x11D46, 0x11D46, BreakClass::Prepend),
    (0x11D47, 0x11D47, BreakClass::Extend),
    (0x11D8A, 0x11D8E, BreakClass::SpacingMark),
    (0x11D90, 0x11D91, BreakClass::Extend),
    (0x11D93, 0x11D94, BreakClass::SpacingMark),
    (0x11D95, 0x11D95, BreakClass::Extend),
    (0x11D96, 0x11D96, BreakClass::SpacingMark),
    (0x11D97, 0x11D97, BreakClass::Extend),
    (0x11EF3, 0x11EF4, BreakClass::Extend),
    (0x11EF5, 0x11EF6, BreakClass::SpacingMark),
    (0x13430, 0x13438, BreakClass::Control),
    (0x16AF0, 0x16AF4, BreakClass::Extend),
    (0x16B30, 0x16B36, BreakClass::Extend),
    (0x16F4F, 0x16F4F, BreakClass::Extend),
    (0x16F51, 0x16F87, BreakClass::SpacingMark),
    (0x16F8F, 0x16F92, BreakClass::Extend),
    (0x16FE4, 0x16FE4, BreakClass::Extend),
    (0x16FF0, 0x16FF1, BreakClass::SpacingMark),
    (0x1BC9D, 0x1BC9E, BreakClass::Extend),
    (0x1BCA0, 0x1BCA3, BreakClass::Control),
    (0x1CF00, 0x1CF2D, BreakClass::Extend),
    (0x1CF30, 0x1CF46, BreakClass::Extend),
    (0x1D165, 0x1D165, BreakClass::Extend),
    (0x1D166, 0x1D166, BreakClass::SpacingMark),
    (0x1D167, 0x1D169, BreakClass::Extend),
    (0x1D16D, 0x1D16D, BreakClass::SpacingMark),
    (0x1D16E, 0x1D172, BreakClass::Extend),
    (0x1D173, 0x1D17A, BreakClass::Control),
    (0x1D17B, 0x1D182, BreakClass::Extend),
    (0x1D185, 0x1D18B, BreakClass::Extend),
    (0x1D1AA, 0x1D1AD, BreakClass::Extend),
    (0x1D242, 0x1D244, BreakClass::Extend),
    (0x1DA00, 0x1DA36, BreakClass::Extend),
    (0x1DA3B, 0x1DA6C, BreakClass::Extend),
    (0x1DA75, 0x1DA75, BreakClass::Extend),
    (0x1DA84, 0x1DA84, BreakClass::Extend),
    (0x1DA9B, 0x1DA9F, BreakClass::Extend),
    (0x1DAA1, 0x1DAAF, BreakClass::Extend),
    (0x1E000, 0x1E006, BreakClass::Extend),
    (0x1E008, 0x1E018, BreakClass::Extend),
    (0x1E01B, 0x1E021, BreakClass::Extend),
    (0x1E023, 0x1E024, BreakClass::Extend),
    (0x1E026, 0x1E02A, BreakClass::Extend),
    (0x1E130, 0x1E136, BreakClass::Extend),
    (0x1E2AE, 0x1E2AE, BreakClass::Extend),
    (0x1E2EC, 0x1E2EF, BreakClass::Extend),
    (0x1E8D0, 0x1E8D6, BreakClass::Extend),
    (0x1E944, 0x1E94A, BreakClass::Extend),
    (0x1F1E6, 0x1F1FF, BreakClass::RegionalIndicator),
    (0x1F3FB, 0x1F3FF, BreakClass::Extend),
    (0xE0000, 0xE001F, BreakClass::Control),
    (0xE0020, 0xE007F, BreakClass::Extend),
    (0xE0080, 0xE00FF, BreakClass::Control),
    (0xE0100, 0xE01EF, BreakClass::Extend),
    (0xE01F0, 0xE0FFF, BreakClass::Control),
];

/// Sorted, non-overlapping `(first, last)` ranges of Extended_Pictographic.
#[rustfmt::skip]
pub(crate) static EXTENDED_PICTOGRAPHIC: &[(u32, u32)] = &[
    (0x00A9, 0x00A9),
    (0x00AE, 0x00AE),
    (0x203C, 0x203C),
    (0x2049, 0x2049),
    (0x2122, 0x2122),
    (0x2139, 0x2139),
    (0x2194, 0x2199),
    (0x21A9, 0x21AA),
    (0x231A, 0x231B),
    (0x2328, 0x2328),
    (0x2388, 0x2388),
    (0x23CF, 0x23CF),
    (0x23E9, 0x23F3),
    (0x23F8, 0x23FA),
    (0x24C2, 0x24C2),
    (0x25AA, 0x25AB),
    (0x25B6, 0x25B6),
    (0x25C0, 0x25C0),
    (0x25FB, 0x25FE),
    (0x2600, 0x2605),
    (0x2607, 0x2612),
    (0x2614, 0x2685),
    (0x2690, 0x2705),
    (0x2708, 0x2712),
    (0x2714, 0x2714),
    (0x2716, 0x2716),
    (0x271D, 0x271D),
    (0x2721, 0x2721),
    (0x2728, 0x2728),
    (0x2733, 0x2734),
    (0x2744, 0x2744),
    (0x2747, 0x2747),
    (0x274C, 0x274C),
    (0x274E, 0x274E),
    (0x2753, 0x2755),
    (0x2757, 0x2757),
    (0x2763, 0x2767),
    (0x2795, 0x2797),
    (0x27A1, 0x27A1),
    (0x27B0, 0x27B0),
    (0x27BF, 0x27BF),
    (0x2934, 0x2935),
    (0x2B05, 0x2B07),
    (0x2B1B, 0x2B1C),
    (0x2B50, 0x2B50),
    (0x2B55, 0x2B55),
    (0x3030, 0x3030),
    (0x303D, 0x303D),
    (0x3297, 0x3297),
    (0x3299, 0x3299),
    (0x1F000, 0x1F0FF),
    (0x1F10D, 0x1F10F),
    (0x1F12F, 0x1F12F),
    (0x1F16C, 0x1F171),
    (0x1F17E, 0x1F17F),
    (0x1F18E, 0x1F18E),
    (0x1F191, 0x1F19A),
    (0x1F1AD, 0x1F1E5),
    (0x1F201, 0x1F20F),
    (0x1F21A, 0x1F21A),
    (0x1F22F, 0x1F22F),
    (0x1F232, 0x1F23A),
    (0x1F23C, 0x1F23F),
    (0x1F249, 0x1F3FA),
    (0x1F400, 0x1F53D),
    (0x1F546, 0x1F64F),
    (0x1F680, 0x1F6FF),
    (0x1F774, 0x1F77F),
    (0x1F7D5, 0x1F7FF),
    (0x1F80C, 0x1F80F),
    (0x1F848, 0x1F84F),
    (0x1F85A, 0x1F85F),
    (0x1F888, 0x1F88F),
    (0x1F8AE, 0x1F8FF),
    (0x1F90C, 0x1F93A),
    (0x1F93C, 0x1F945),
    (0x1F947, 0x1FAFF),
    (0x1FC00, 0x1FFFD),
];
