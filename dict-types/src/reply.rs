//! Server replies.
//!
//! See <https://datatracker.ietf.org/doc/html/rfc2229#section-2.4>.

/// Reply status codes used by this server.
pub mod code {
    /// `110 n databases present`
    pub const DATABASES_PRESENT: u16 = 110;
    /// `111 n present`
    pub const STRATEGIES_PRESENT: u16 = 111;
    /// `112 information for <database>`
    pub const DATABASE_INFO: u16 = 112;
    /// `114 server information`
    pub const SERVER_INFO: u16 = 114;
    /// `150 n definitions`
    pub const DEFINITIONS_FOLLOW: u16 = 150;
    /// `151 "<word>" <database> "<description>"`
    pub const DEFINITION_FOLLOWS: u16 = 151;
    /// `152 n matches found`
    pub const MATCHES_FOUND: u16 = 152;
    /// The initial banner.
    pub const HELLO: u16 = 220;
    /// `221 bye`
    pub const BYE: u16 = 221;
    /// `250 ok`
    pub const OK: u16 = 250;
    /// `500 unknown command`
    pub const UNKNOWN_COMMAND: u16 = 500;
    /// `501 syntax error, illegal parameters`
    pub const ILLEGAL_PARAMETERS: u16 = 501;
    /// `550 invalid database`
    pub const INVALID_DATABASE: u16 = 550;
    /// `552 no match`
    pub const NO_MATCH: u16 = 552;
}

/// One unit of server output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reply {
    /// `<code> <message>` status line.
    Status { code: u16, message: String },
    /// A bare continuation line.
    Line(String),
    /// A dot-terminated text block. With `mime` set, the block opens with a
    /// short MIME header and a blank line, inside the block.
    Text { body: String, mime: bool },
}

impl Reply {
    pub fn status<M>(code: u16, message: M) -> Self
    where
        M: Into<String>,
    {
        Self::Status {
            code,
            message: message.into(),
        }
    }

    pub fn line<L>(line: L) -> Self
    where
        L: Into<String>,
    {
        Self::Line(line.into())
    }

    pub fn text<B>(body: B, mime: bool) -> Self
    where
        B: Into<String>,
    {
        Self::Text {
            body: body.into(),
            mime,
        }
    }
}

/// The `220` banner sent once when a session starts.
///
/// On the wire the capability list and the msg-id are angle-bracketed:
/// `220 <server> <cap1.cap2> <msg-id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Greeting {
    /// Server name, as configured.
    pub server: String,
    /// Negotiable capabilities, joined with `.` on the wire.
    pub capabilities: Vec<String>,
    /// Session msg-id, unique per connection.
    pub msg_id: String,
}
