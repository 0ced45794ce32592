//! Description of how interleaved vertex attributes are packed in a
//! [`super::VertexBuffer`].

/// Component type of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    F32,
    U32,
    U8,
}

impl ElementType {
    /// Size of a single component in bytes.
    pub fn size(self) -> usize {
        match self {
            ElementType::F32 => std::mem::size_of::<f32>(),
            ElementType::U32 => std::mem::size_of::<u32>(),
            ElementType::U8 => std::mem::size_of::<u8>(),
        }
    }

    pub fn gl_enum(self) -> gl::types::GLenum {
        match self {
            ElementType::F32 => gl::FLOAT,
            ElementType::U32 => gl::UNSIGNED_INT,
            ElementType::U8 => gl::UNSIGNED_BYTE,
        }
    }

    /// Bytes are normalized to [0, 1] (colors), everything else is
    /// passed through as is.
    pub fn normalized(self) -> bool {
        matches!(self, ElementType::U8)
    }

    /// Integer attributes that are not normalized must be fetched
    /// with `glVertexAttribIPointer()`.
    pub fn is_integer(self) -> bool {
        matches!(self, ElementType::U32)
    }
}

/// Types that can be pushed onto a [`VertexBufferLayout`].
pub trait LayoutElement {
    const ELEMENT_TYPE: ElementType;
}

impl LayoutElement for f32 {
    const ELEMENT_TYPE: ElementType = ElementType::F32;
}

impl LayoutElement for u32 {
    const ELEMENT_TYPE: ElementType = ElementType::U32;
}

impl LayoutElement for u8 {
    const ELEMENT_TYPE: ElementType = ElementType::U8;
}

/// A single attribute, `count` components of `element_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBufferElement {
    pub element_type: ElementType,
    pub count: usize,
}

impl VertexBufferElement {
    pub fn size(&self) -> usize {
        self.count * self.element_type.size()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexBufferLayout {
    elements: Vec<VertexBufferElement>,
    stride: usize,
}

impl VertexBufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute of `count` components of type `T`.
    pub fn push<T: LayoutElement>(&mut self, count: usize) -> &mut Self {
        let element = VertexBufferElement {
            element_type: T::ELEMENT_TYPE,
            count,
        };
        self.stride += element.size();
        self.elements.push(element);
        self
    }

    pub fn elements(&self) -> &[VertexBufferElement] {
        &self.elements
    }

    /// Bytes between two consecutive vertices.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Elements along with their byte offset from the start of the
    /// vertex.
    pub fn offsets(&self) -> impl Iterator<Item = (usize, &VertexBufferElement)> + '_ {
        self.elements.iter().scan(0, |offset, element| {
            let current = *offset;
            *offset += element.size();
            Some((current, element))
        })
    }
}
