//! Diagnostic field identifiers

/// Identifier of a single diagnostic field attached to a server error.
///
/// Each variant maps to the one-byte code used by the wire protocol's
/// `ErrorResponse`/`NoticeResponse` messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldCode {
    Severity,
    SqlState,
    MessagePrimary,
    MessageDetail,
    MessageHint,
    StatementPosition,
    InternalPosition,
    InternalQuery,
    Context,
    SchemaName,
    TableName,
    ColumnName,
    DatatypeName,
    ConstraintName,
    SourceFile,
    SourceLine,
    SourceFunction,
}

/// Number of known field codes.
pub const FIELD_COUNT: usize = 17;

impl FieldCode {
    /// Every field code, in declaration order.
    pub const ALL: [FieldCode; FIELD_COUNT] = [
        FieldCode::Severity,
        FieldCode::SqlState,
        FieldCode::MessagePrimary,
        FieldCode::MessageDetail,
        FieldCode::MessageHint,
        FieldCode::StatementPosition,
        FieldCode::InternalPosition,
        FieldCode::InternalQuery,
        FieldCode::Context,
        FieldCode::SchemaName,
        FieldCode::TableName,
        FieldCode::ColumnName,
        FieldCode::DatatypeName,
        FieldCode::ConstraintName,
        FieldCode::SourceFile,
        FieldCode::SourceLine,
        FieldCode::SourceFunction,
    ];

    /// Protocol byte for this field.
    pub fn as_byte(self) -> u8 {
        match self {
            FieldCode::Severity => b'S',
            FieldCode::SqlState => b'C',
            FieldCode::MessagePrimary => b'M',
            FieldCode::MessageDetail => b'D',
            FieldCode::MessageHint => b'H',
            FieldCode::StatementPosition => b'P',
            FieldCode::InternalPosition => b'p',
            FieldCode::InternalQuery => b'q',
            FieldCode::Context => b'W',
            FieldCode::SchemaName => b's',
            FieldCode::TableName => b't',
            FieldCode::ColumnName => b'c',
            FieldCode::DatatypeName => b'd',
            FieldCode::ConstraintName => b'n',
            FieldCode::SourceFile => b'F',
            FieldCode::SourceLine => b'L',
            FieldCode::SourceFunction => b'R',
        }
    }

    /// Property name used by JavaScript-style driver error objects
    /// (`err.internalPosition`, `err.dataType`, ...).
    pub fn driver_key(self) -> &'static str {
        match self {
            FieldCode::Severity => "severity",
            FieldCode::SqlState => "code",
            FieldCode::MessagePrimary => "message",
            FieldCode::MessageDetail => "detail",
            FieldCode::MessageHint => "hint",
            FieldCode::StatementPosition => "position",
            FieldCode::InternalPosition => "internalPosition",
            FieldCode::InternalQuery => "internalQuery",
            FieldCode::Context => "where",
            FieldCode::SchemaName => "schema",
            FieldCode::TableName => "table",
            FieldCode::ColumnName => "column",
            FieldCode::DatatypeName => "dataType",
            FieldCode::ConstraintName => "constraint",
            FieldCode::SourceFile => "file",
            FieldCode::SourceLine => "line",
            FieldCode::SourceFunction => "routine",
        }
    }

    /// Section label written in front of this field's value, for the fields
    /// that get a line of their own.
    pub fn label(self) -> Option<&'static str> {
        match self {
            FieldCode::MessageDetail => Some("DETAIL"),
            FieldCode::MessageHint => Some("HINT"),
            FieldCode::InternalQuery => Some("QUERY"),
            FieldCode::Context => Some("CONTEXT"),
            FieldCode::SchemaName => Some("SCHEMA NAME"),
            FieldCode::TableName => Some("TABLE NAME"),
            FieldCode::ColumnName => Some("COLUMN NAME"),
            FieldCode::DatatypeName => Some("DATATYPE NAME"),
            FieldCode::ConstraintName => Some("CONSTRAINT NAME"),
            _ => None,
        }
    }

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for FieldCode {
    type Error = u8;

    /// Map a protocol byte back to its field; unknown bytes are handed back.
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        FieldCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_byte() == byte)
            .ok_or(byte)
    }
}
