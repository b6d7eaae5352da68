const F32_SIZE: u64 = std::mem::size_of::<f32>() as u64;

/// One named attribute inside an interleaved vertex record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Name of the vertex-stage input this entry feeds.
    pub name: String,

    /// Number of `f32` components read per vertex.
    pub components: u32,

    /// Byte offset from the start of the vertex record.
    pub offset: u64,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>, components: u32, offset: u64) -> Self {
        Self {
            name: name.into(),
            components,
            offset,
        }
    }

    /// Byte size of the attribute within a record.
    #[inline]
    pub fn byte_len(&self) -> u64 {
        self.components as u64 * F32_SIZE
    }
}

/// Describes how raw vertex bytes map onto named attributes.
///
/// All attributes share one stride; records are tightly interleaved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    pub stride: u64,
    pub attributes: Vec<AttributeSpec>,
}

impl VertexLayout {
    pub fn new(stride: u64, attributes: Vec<AttributeSpec>) -> Self {
        Self { stride, attributes }
    }

    /// Layout of the quad vertex: `aPosition` (2 floats) then `aColor` (3 floats).
    pub fn quad() -> Self {
        Self::new(
            5 * F32_SIZE,
            vec![
                AttributeSpec::new("aPosition", 2, 0),
                AttributeSpec::new("aColor", 3, 2 * F32_SIZE),
            ],
        )
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Number of `f32` values in one vertex record.
    pub fn floats_per_vertex(&self) -> usize {
        (self.stride / F32_SIZE) as usize
    }

    /// Number of whole vertex records contained in `byte_len` bytes.
    pub fn vertex_count(&self, byte_len: u64) -> u32 {
        if self.stride == 0 {
            return 0;
        }
        (byte_len / self.stride) as u32
    }

    /// Decodes attribute `name` of vertex `vertex` from raw buffer bytes.
    ///
    /// Mirrors the fetch the GPU performs for this layout. Returns `None` for
    /// unknown attributes or reads past the end of `bytes`.
    pub fn read(&self, bytes: &[u8], vertex: usize, name: &str) -> Option<Vec<f32>> {
        let attr = self.attribute(name)?;
        let start = (vertex as u64)
            .checked_mul(self.stride)?
            .checked_add(attr.offset)? as usize;
        let end = start.checked_add(attr.byte_len() as usize)?;
        let raw = bytes.get(start..end)?;

        Some(
            raw.chunks_exact(F32_SIZE as usize)
                .map(bytemuck::pod_read_unaligned::<f32>)
                .collect(),
        )
    }
}
