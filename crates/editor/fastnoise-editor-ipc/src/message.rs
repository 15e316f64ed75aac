/// Type of an inbound editor message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// The pending message is larger than the poll buffer; it stays queued.
    BufferTooSmall,
    None,
    SelectedNode,
    ImportRequest,
    /// A code this crate does not know; newer editors may send more kinds.
    Other(i32),
}

impl MessageKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => MessageKind::BufferTooSmall,
            0 => MessageKind::None,
            1 => MessageKind::SelectedNode,
            2 => MessageKind::ImportRequest,
            other => MessageKind::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            MessageKind::BufferTooSmall => -1,
            MessageKind::None => 0,
            MessageKind::SelectedNode => 1,
            MessageKind::ImportRequest => 2,
            MessageKind::Other(code) => code,
        }
    }

    /// Whether messages of this kind carry an encoded tree.
    pub fn has_payload(self) -> bool {
        self.code() > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResult {
    pub kind: MessageKind,
    pub encoded_node_tree: Option<String>,
}

impl PollResult {
    /// Decode a filled poll buffer: the payload runs to the first NUL, or the whole
    /// buffer when there is none.
    pub fn decode(code: i32, buffer: &[u8]) -> Self {
        let kind = MessageKind::from_code(code);
        let encoded_node_tree = kind.has_payload().then(|| {
            let len = buffer.iter().position(|b| *b == 0).unwrap_or(buffer.len());
            String::from_utf8_lossy(&buffer[..len]).into_owned()
        });
        Self {
            kind,
            encoded_node_tree,
        }
    }
}
