use crate::grid::LayoutId;

#[derive(Debug)]
pub enum MidiError {
    InputConnectError(midir::ConnectError<midir::MidiInput>),
    OutputConnectError(midir::ConnectError<midir::MidiOutput>),
    InitError(midir::InitError),
    PortInfoError(midir::PortInfoError),
    SendError(midir::SendError),
    NoPortFound {
        // The keyword that was searched for
        keyword: &'static str,
    },
    /// A SysEx string contained a token that isn't a two-digit hex byte
    InvalidSysexToken { token: String },
}

impl std::fmt::Display for MidiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputConnectError(_) => f.write_str("connecting to MIDI input port failed"),
            Self::OutputConnectError(_) => f.write_str("connecting to MIDI output port failed"),
            Self::InitError(_) => f.write_str("MIDI context initialization failed"),
            Self::PortInfoError(_) => f.write_str("MIDI Port retrieval failed"),
            Self::SendError(_) => f.write_str("sending MIDI message failed"),
            Self::NoPortFound { keyword } => write!(f, "couldn't find a port for {:?}", keyword),
            Self::InvalidSysexToken { token } => {
                write!(f, "invalid SysEx byte token {:?}", token)
            }
        }
    }
}

impl std::error::Error for MidiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InputConnectError(e) => Some(e),
            Self::OutputConnectError(e) => Some(e),
            Self::InitError(e) => Some(e),
            Self::PortInfoError(e) => Some(e),
            Self::SendError(e) => Some(e),
            Self::NoPortFound { keyword: _ } => None,
            Self::InvalidSysexToken { token: _ } => None,
        }
    }
}

impl From<midir::ConnectError<midir::MidiInput>> for MidiError {
    fn from(e: midir::ConnectError<midir::MidiInput>) -> Self {
        Self::InputConnectError(e)
    }
}

impl From<midir::ConnectError<midir::MidiOutput>> for MidiError {
    fn from(e: midir::ConnectError<midir::MidiOutput>) -> Self {
        Self::OutputConnectError(e)
    }
}

impl From<midir::InitError> for MidiError {
    fn from(e: midir::InitError) -> Self {
        Self::InitError(e)
    }
}

impl From<midir::PortInfoError> for MidiError {
    fn from(e: midir::PortInfoError) -> Self {
        Self::PortInfoError(e)
    }
}

impl From<midir::SendError> for MidiError {
    fn from(e: midir::SendError) -> Self {
        Self::SendError(e)
    }
}

/// Errors raised by the grid model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The grid geometry is empty, or its largest linear note index doesn't fit a MIDI data byte
    InvalidGeometry { columns: u8, rows: u8 },
    /// No layout with this id is registered on the grid
    UnknownLayout(LayoutId),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGeometry { columns, rows } => {
                write!(f, "unsupported grid geometry {}x{}", columns, rows)
            }
            Self::UnknownLayout(id) => write!(f, "no layout registered with id {}", id.index()),
        }
    }
}

impl std::error::Error for GridError {}

/// Errors raised while loading or playing light shows
#[derive(Debug)]
pub enum ShowError {
    ParseError(toml::de::Error),
    UnknownShow { name: String },
    GridError(GridError),
}

impl std::fmt::Display for ShowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParseError(_) => f.write_str("parsing the light show table failed"),
            Self::UnknownShow { name } => write!(f, "no light show named {:?}", name),
            Self::GridError(_) => f.write_str("preparing the show layout failed"),
        }
    }
}

impl std::error::Error for ShowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ParseError(e) => Some(e),
            Self::UnknownShow { name: _ } => None,
            Self::GridError(e) => Some(e),
        }
    }
}

impl From<toml::de::Error> for ShowError {
    fn from(e: toml::de::Error) -> Self {
        Self::ParseError(e)
    }
}

impl From<GridError> for ShowError {
    fn from(e: GridError) -> Self {
        Self::GridError(e)
    }
}
