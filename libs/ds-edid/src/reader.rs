use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("Needed {needed} bytes at offset {offset} but only {remaining} remain")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
}

/// A cursor over untrusted EDID bytes.
///
/// Every sub-read goes through [`ByteReader::read_var_n`], so nothing here can
/// index past the end of the slice it was given.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_var_n(&mut self, n: usize) -> Result<&'a [u8], ReadError> {
        if self.remaining() < n {
            return Err(ReadError::UnexpectedEof {
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let v = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(v)
    }

    pub fn read_n<const N: usize>(&mut self) -> Result<&'a [u8; N], ReadError> {
        let slice = self.read_var_n(N)?;
        // Length was checked by read_var_n
        slice.try_into().map_err(|_| ReadError::UnexpectedEof {
            offset: self.pos,
            needed: N,
            remaining: slice.len(),
        })
    }

    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        let [a] = *self.read_n::<1>()?;
        Ok(a)
    }

    pub fn read_u16_le(&mut self) -> Result<u16, ReadError> {
        Ok(u16::from_le_bytes(*self.read_n()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, ReadError> {
        Ok(u32::from_le_bytes(*self.read_n()?))
    }

    pub fn skip(&mut self, n: usize) -> Result<(), ReadError> {
        self.read_var_n(n).map(|_| ())
    }

    /// Splits off the next `n` bytes as an independent reader.
    pub fn nest(&mut self, n: usize) -> Result<ByteReader<'a>, ReadError> {
        Ok(ByteReader::new(self.read_var_n(n)?))
    }
}

#[cfg(test)]
mod test {
    use super::{ByteReader, ReadError};

    #[test]
    fn test_reads_little_endian() {
        let bytes = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xAA];
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u16_le(), Ok(0x1234));
        assert_eq!(reader.read_u32_le(), Ok(0x1234_5678));
        assert_eq!(reader.read_u8(), Ok(0xAA));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_past_end_is_an_error() {
        let bytes = [1, 2, 3];
        let mut reader = ByteReader::new(&bytes);
        assert!(reader.skip(2).is_ok());
        assert_eq!(
            reader.read_u16_le(),
            Err(ReadError::UnexpectedEof {
                offset: 2,
                needed: 2,
                remaining: 1,
            })
        );
        // A failed read does not consume anything
        assert_eq!(reader.read_u8(), Ok(3));
    }

    #[test]
    fn test_nested_reader_is_bounded() {
        let bytes = [1, 2, 3, 4];
        let mut reader = ByteReader::new(&bytes);
        let mut nested = reader.nest(2).unwrap();
        assert_eq!(nested.read_var_n(2), Ok(&[1u8, 2][..]));
        assert!(nested.read_u8().is_err());
        assert_eq!(reader.remaining(), 2);
    }
}
