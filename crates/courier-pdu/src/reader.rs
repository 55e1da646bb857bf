//! Bounds-checked byte cursor.

use crate::error::{PduError, PduResult};

pub(crate) struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn u8(&mut self, field: &'static str) -> PduResult<u8> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(PduError::Truncated { field })?;
        self.pos = self.pos.saturating_add(1);
        Ok(byte)
    }

    pub(crate) fn take(&mut self, len: usize, field: &'static str) -> PduResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .ok_or(PduError::Truncated { field })?;
        let slice = self
            .data
            .get(self.pos..end)
            .ok_or(PduError::Truncated { field })?;
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn rest(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }
}
