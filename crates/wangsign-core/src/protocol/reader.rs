use super::error::PacketError;
use super::layout;

/// Bounds-checked access to the fixed header.
pub struct HeaderReader<'a> {
    payload: &'a [u8],
}

impl<'a> HeaderReader<'a> {
    pub fn new(payload: &'a [u8]) -> Result<Self, PacketError> {
        if payload.len() < layout::HEADER_LEN {
            return Err(PacketError::TruncatedHeader {
                actual: payload.len(),
            });
        }
        Ok(Self { payload })
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, PacketError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(PacketError::TruncatedHeader {
                actual: self.payload.len(),
            })
    }

    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> Result<u16, PacketError> {
        let bytes = self.read_array::<2>(range)?;
        Ok(u16::from_be_bytes(bytes))
    }

    pub fn read_array<const N: usize>(
        &self,
        range: std::ops::Range<usize>,
    ) -> Result<[u8; N], PacketError> {
        self.read_slice(range)?
            .try_into()
            .map_err(|_| PacketError::TruncatedHeader {
                actual: self.payload.len(),
            })
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], PacketError> {
        self.payload.get(range).ok_or(PacketError::TruncatedHeader {
            actual: self.payload.len(),
        })
    }

    /// Bytes following the header.
    pub fn body(&self) -> &'a [u8] {
        &self.payload[layout::HEADER_LEN..]
    }
}

/// Sequential reader over the concatenated message bodies.
pub struct BodyReader<'a> {
    body: &'a [u8],
    consumed: usize,
}

impl<'a> BodyReader<'a> {
    pub fn new(body: &'a [u8]) -> Self {
        Self { body, consumed: 0 }
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.body.len() - self.consumed
    }

    /// Takes `count` cells for `slot`, leaving the cursor untouched on failure.
    pub fn take_cells(
        &mut self,
        slot: usize,
        count: usize,
    ) -> Result<Vec<[u8; layout::CELL_HEIGHT]>, PacketError> {
        let needed = count * layout::CELL_HEIGHT;
        if self.remaining() < needed {
            return Err(PacketError::TruncatedBody {
                slot,
                needed,
                actual: self.remaining(),
            });
        }
        let bytes = &self.body[self.consumed..self.consumed + needed];
        self.consumed += needed;
        Ok(bytes
            .chunks_exact(layout::CELL_HEIGHT)
            .map(|chunk| {
                let mut cell = [0u8; layout::CELL_HEIGHT];
                cell.copy_from_slice(chunk);
                cell
            })
            .collect())
    }
}

pub(crate) fn bit_set(mask: u8, slot: usize) -> bool {
    mask & (1 << slot) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_reader_rejects_short_payload() {
        let payload = [0u8; layout::HEADER_LEN - 1];
        let err = HeaderReader::new(&payload).err().expect("short header");
        assert_eq!(
            err,
            PacketError::TruncatedHeader {
                actual: layout::HEADER_LEN - 1
            }
        );
    }

    #[test]
    fn body_reader_splits_cells() {
        let body: Vec<u8> = (0..22).collect();
        let mut reader = BodyReader::new(&body);
        let cells = reader.take_cells(0, 2).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1][0], 11);
        assert_eq!(reader.consumed(), 22);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn body_reader_reports_missing_bytes() {
        let body = [0u8; 15];
        let mut reader = BodyReader::new(&body);
        let err = reader.take_cells(3, 2).unwrap_err();
        assert_eq!(
            err,
            PacketError::TruncatedBody {
                slot: 3,
                needed: 22,
                actual: 15
            }
        );
        assert_eq!(reader.consumed(), 0);
    }

    #[test]
    fn bit_set_checks_slot_bit() {
        assert!(bit_set(0b0000_0100, 2));
        assert!(!bit_set(0b0000_0100, 1));
    }
}
