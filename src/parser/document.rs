/// String-side payload of a load or dump
///
/// Text backends accept and produce `Text`, binary backends `Binary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Text(String),
    Binary(Vec<u8>),
}

impl Document {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Document::Text(text) => text.as_bytes(),
            Document::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Document::Text(text) => Some(text),
            Document::Binary(_) => None,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Document::Binary(_))
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Document::Text(text) => text.into_bytes(),
            Document::Binary(bytes) => bytes,
        }
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Document::Text(text)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Document {
    fn from(bytes: Vec<u8>) -> Self {
        Document::Binary(bytes)
    }
}

impl From<&[u8]> for Document {
    fn from(bytes: &[u8]) -> Self {
        Document::Binary(bytes.to_vec())
    }
}
