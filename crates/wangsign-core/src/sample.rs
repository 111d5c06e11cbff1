/// Known-good badge packet: one Animation message, speed 4, 11 cells,
/// stamped 2019-08-30 23:11:39.
///
/// The unused speed/mode slots carry `0x45`; decoding ignores them.
pub const SAMPLE_PACKET: [u8; 192] = [
    0x77, 0x61, 0x6E, 0x67, 0x00, 0x00, 0x00, 0x00, 0x45, 0x45, 0x45, 0x45,
    0x45, 0x45, 0x45, 0x45, 0x00, 0x0B, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x13, 0x08, 0x1E, 0x17, 0x0B, 0x27, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x19, 0x00, 0x11, 0x00, 0x04, 0x40, 0x20,
    0x3F, 0x00, 0x00, 0x00, 0x80, 0x07, 0x04, 0x04, 0x07, 0x40, 0x84, 0x87,
    0x00, 0x00, 0x00, 0x00, 0x80, 0x80, 0x00, 0x80, 0x9F, 0x95, 0x95, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x04, 0x24, 0x04, 0x24, 0x24, 0x24, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x01, 0xF1, 0x91, 0xF1, 0x81, 0xF0, 0x01, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x33,
    0x00, 0x11, 0x00, 0x04, 0x00, 0x60, 0x3F, 0x00, 0x00, 0x00, 0x00, 0x07,
    0x04, 0x04, 0x07, 0x00, 0xC4, 0x87, 0x00, 0x00, 0x00, 0x00, 0x80, 0x80,
    0x00, 0x80, 0x9F, 0x95, 0x95, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x24,
    0x04, 0x24, 0x24, 0x24, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0xF1, 0x91,
    0xF1, 0x81, 0xF0, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];
