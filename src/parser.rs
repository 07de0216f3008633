use crate::catalog::{PoiCatalog, WaypointCatalog};
use crate::diag::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::model::{Poi, PoiCategory, Record, Waypoint};
use crate::scanner::{Scanner, Token, TokenKind};

/// The states of the document reader.
///
/// The machine cycles `WaitingObjectBegin → ... → WaitingObjectSeparator`
/// once per record and `WaitingDbName → ... → WaitingDbArraySeparator` once
/// per named array. There is no distinguished accept state: a document is
/// read successfully when the token stream simply runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    WaitingFileBegin,
    WaitingDbName,
    WaitingDbNameSeparator,
    WaitingDbArrayBegin,
    WaitingObjectBegin,
    WaitingAttributeName,
    WaitingAttributeNameSeparator,
    WaitingAttributeValue,
    WaitingAttributeValueSeparator,
    WaitingObjectSeparator,
    WaitingDbArraySeparator,
    /// After an unknown database name: waiting for its `:`.
    SkippingDbNameSeparator,
    /// Consuming the unknown database's value, tracking bracket depth until
    /// it closes.
    SkippingDbValue { depth: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Database {
    Waypoints,
    Pois,
}

impl Database {
    fn max_attributes(self) -> u32 {
        match self {
            Database::Waypoints => 3,
            Database::Pois => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attribute {
    Name,
    Latitude,
    Longitude,
    Type,
    Description,
}

impl Attribute {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Attribute::Name),
            "latitude" => Some(Attribute::Latitude),
            "longitude" => Some(Attribute::Longitude),
            "type" => Some(Attribute::Type),
            "description" => Some(Attribute::Description),
            _ => None,
        }
    }
}

/// Accumulator for the object currently being read. Scoped to one record's
/// parsing window: reset every time the machine handles a token in
/// `WaitingObjectSeparator`.
#[derive(Debug, Clone)]
struct ObjectState {
    name: String,
    latitude: f64,
    longitude: f64,
    category: String,
    description: String,
    seen: [u8; 5],
    attribute_count: u32,
    ok: bool,
}

impl Default for ObjectState {
    fn default() -> Self {
        Self {
            name: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            category: String::new(),
            description: String::new(),
            seen: [0; 5],
            attribute_count: 0,
            ok: true,
        }
    }
}

impl ObjectState {
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Records one occurrence of an attribute; a second occurrence corrupts
    /// the object.
    fn saw(&mut self, attribute: Attribute) {
        let count = &mut self.seen[attribute as usize];
        *count += 1;
        if *count == 2 {
            self.ok = false;
        }
    }

    fn has(&self, attribute: Attribute) -> bool {
        self.seen[attribute as usize] > 0
    }
}

/// What one step of the machine produced.
#[derive(Debug, Default)]
pub struct Outcome {
    pub diagnostic: Option<DiagnosticKind>,
    pub emit: Option<Record>,
}

impl Outcome {
    fn none() -> Self {
        Self::default()
    }

    fn diag(kind: DiagnosticKind) -> Self {
        Self {
            diagnostic: Some(kind),
            emit: None,
        }
    }

    fn emit(record: Record) -> Self {
        Self {
            diagnostic: None,
            emit: Some(record),
        }
    }
}

/// The schema-aware state machine over the token stream.
///
/// `feed` is free of I/O: it takes one token and yields at most one
/// diagnostic and at most one validated record, leaving file handling and
/// catalog insertion to the caller. Unexpected tokens never advance the
/// state, so the same expectation is retried against the next token; at end
/// of input the retry loop terminates because no further tokens exist.
#[derive(Debug)]
pub struct Machine {
    state: State,
    database: Option<Database>,
    attribute: Attribute,
    object: ObjectState,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Self {
            state: State::WaitingFileBegin,
            database: None,
            attribute: Attribute::Name,
            object: ObjectState::default(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn feed(&mut self, token: &Token) -> Outcome {
        match self.state {
            State::WaitingFileBegin => self.on_file_begin(token),
            State::WaitingDbName => self.on_db_name(token),
            State::WaitingDbNameSeparator => self.on_db_name_separator(token),
            State::WaitingDbArrayBegin => self.on_db_array_begin(token),
            State::WaitingObjectBegin => self.on_object_begin(token),
            State::WaitingAttributeName => self.on_attribute_name(token),
            State::WaitingAttributeNameSeparator => self.on_attribute_name_separator(token),
            State::WaitingAttributeValue => self.on_attribute_value(token),
            State::WaitingAttributeValueSeparator => self.on_attribute_value_separator(token),
            State::WaitingObjectSeparator => self.on_object_separator(token),
            State::WaitingDbArraySeparator => self.on_db_array_separator(token),
            State::SkippingDbNameSeparator => self.on_skipping_name_separator(token),
            State::SkippingDbValue { depth } => self.on_skipping_value(token, depth),
        }
    }

    fn on_file_begin(&mut self, token: &Token) -> Outcome {
        match token.kind {
            TokenKind::BeginObject => {
                self.state = State::WaitingDbName;
                Outcome::none()
            }
            _ => unexpected("'{'"),
        }
    }

    fn on_db_name(&mut self, token: &Token) -> Outcome {
        match &token.kind {
            TokenKind::String(name) => match name.as_str() {
                "waypoints" => {
                    self.database = Some(Database::Waypoints);
                    self.state = State::WaitingDbNameSeparator;
                    Outcome::none()
                }
                "pois" => {
                    self.database = Some(Database::Pois);
                    self.state = State::WaitingDbNameSeparator;
                    Outcome::none()
                }
                _ => {
                    self.state = State::SkippingDbNameSeparator;
                    Outcome::diag(DiagnosticKind::UnknownDatabase { name: name.clone() })
                }
            },
            _ => unexpected("a database name"),
        }
    }

    fn on_db_name_separator(&mut self, token: &Token) -> Outcome {
        match token.kind {
            TokenKind::NameSeparator => {
                self.state = State::WaitingDbArrayBegin;
                Outcome::none()
            }
            _ => unexpected("':'"),
        }
    }

    fn on_db_array_begin(&mut self, token: &Token) -> Outcome {
        match token.kind {
            TokenKind::BeginArray => {
                self.state = State::WaitingObjectBegin;
                Outcome::none()
            }
            _ => unexpected("'['"),
        }
    }

    fn on_object_begin(&mut self, token: &Token) -> Outcome {
        match token.kind {
            TokenKind::BeginObject => {
                self.state = State::WaitingAttributeName;
                Outcome::none()
            }
            TokenKind::EndArray => {
                // Empty record array: nothing to read, move on to whatever
                // follows the array.
                self.state = State::WaitingDbArraySeparator;
                Outcome::none()
            }
            _ => unexpected("'{' or ']'"),
        }
    }

    fn on_attribute_name(&mut self, token: &Token) -> Outcome {
        match &token.kind {
            TokenKind::String(name) => match Attribute::from_name(name) {
                Some(attribute) => {
                    self.attribute = attribute;
                    self.state = State::WaitingAttributeNameSeparator;
                    Outcome::none()
                }
                None => {
                    // Unknown attribute: the rest of this object is skipped.
                    self.object.ok = false;
                    self.state = State::WaitingObjectSeparator;
                    Outcome::diag(DiagnosticKind::CorruptedObject)
                }
            },
            _ => unexpected("an attribute name"),
        }
    }

    fn on_attribute_name_separator(&mut self, token: &Token) -> Outcome {
        match token.kind {
            TokenKind::NameSeparator => {
                self.state = State::WaitingAttributeValue;
                Outcome::none()
            }
            _ => unexpected("':'"),
        }
    }

    fn on_attribute_value(&mut self, token: &Token) -> Outcome {
        let was_ok = self.object.ok;
        match &token.kind {
            TokenKind::String(value) => {
                // String values route by the pending attribute name; anything
                // that is not name or type lands in description. A string
                // under a numeric attribute therefore never reaches the
                // coordinates and surfaces later as a missing attribute.
                match self.attribute {
                    Attribute::Name => {
                        self.object.name = value.clone();
                        self.object.saw(Attribute::Name);
                    }
                    Attribute::Type => {
                        self.object.category = value.clone();
                        self.object.saw(Attribute::Type);
                    }
                    _ => {
                        self.object.description = value.clone();
                        self.object.saw(Attribute::Description);
                    }
                }
                self.object.attribute_count += 1;
                self.after_value(was_ok)
            }
            TokenKind::Number(value) => {
                match self.attribute {
                    Attribute::Latitude => {
                        self.object.latitude = *value;
                        self.object.saw(Attribute::Latitude);
                    }
                    _ => {
                        self.object.longitude = *value;
                        self.object.saw(Attribute::Longitude);
                    }
                }
                let lat_ok = (-90.0..=90.0).contains(&self.object.latitude);
                let lon_ok = (-180.0..=180.0).contains(&self.object.longitude);
                if !(lat_ok && lon_ok) {
                    self.object.ok = false;
                }
                self.object.attribute_count += 1;
                self.after_value(was_ok)
            }
            _ => unexpected("an attribute value"),
        }
    }

    /// Common tail of value handling: check the running attribute count
    /// against the schema maximum and move on to the value separator.
    /// Corruption is reported once, at the value that introduces it; later
    /// values of an already-corrupted object are consumed silently.
    fn after_value(&mut self, was_ok: bool) -> Outcome {
        self.state = State::WaitingAttributeValueSeparator;
        let Some(database) = self.database else {
            return Outcome::none();
        };
        if self.object.attribute_count > database.max_attributes() {
            self.object.ok = false;
        }
        if !self.object.ok && was_ok {
            return Outcome::diag(DiagnosticKind::CorruptedObject);
        }
        Outcome::none()
    }

    fn on_attribute_value_separator(&mut self, token: &Token) -> Outcome {
        match token.kind {
            TokenKind::ValueSeparator => {
                self.state = State::WaitingAttributeName;
                Outcome::none()
            }
            TokenKind::EndObject => {
                self.state = State::WaitingObjectSeparator;
                self.finish_object()
            }
            _ => unexpected("',' or '}'"),
        }
    }

    /// Closes out the current object: a clean object with all required
    /// attributes becomes a record; anything else is dropped.
    fn finish_object(&mut self) -> Outcome {
        let Some(database) = self.database else {
            return Outcome::none();
        };
        if !self.object.ok {
            // Corruption was already diagnosed when it happened.
            return Outcome::none();
        }

        let object = &self.object;
        match database {
            Database::Waypoints => {
                if !(object.has(Attribute::Name)
                    && object.has(Attribute::Latitude)
                    && object.has(Attribute::Longitude))
                {
                    return Outcome::diag(DiagnosticKind::AttributesMissing);
                }
                match Waypoint::new(object.name.clone(), object.latitude, object.longitude) {
                    Ok(waypoint) => Outcome::emit(Record::Waypoint(waypoint)),
                    Err(_) => Outcome::diag(DiagnosticKind::CorruptedObject),
                }
            }
            Database::Pois => {
                if !(object.has(Attribute::Name)
                    && object.has(Attribute::Latitude)
                    && object.has(Attribute::Longitude)
                    && object.has(Attribute::Type)
                    && object.has(Attribute::Description))
                {
                    return Outcome::diag(DiagnosticKind::AttributesMissing);
                }
                let category = PoiCategory::from_label(&object.category);
                match Poi::new(
                    category,
                    object.name.clone(),
                    object.description.clone(),
                    object.latitude,
                    object.longitude,
                ) {
                    Ok(poi) => Outcome::emit(Record::Poi(poi)),
                    Err(_) => Outcome::diag(DiagnosticKind::CorruptedObject),
                }
            }
        }
    }

    fn on_object_separator(&mut self, token: &Token) -> Outcome {
        // The accumulator's lifetime ends at this boundary.
        self.object.reset();
        match token.kind {
            TokenKind::ValueSeparator => {
                self.state = State::WaitingObjectBegin;
                Outcome::none()
            }
            TokenKind::EndArray => {
                self.state = State::WaitingDbArraySeparator;
                Outcome::none()
            }
            _ => unexpected("',' or ']'"),
        }
    }

    fn on_db_array_separator(&mut self, token: &Token) -> Outcome {
        match token.kind {
            TokenKind::ValueSeparator => {
                self.state = State::WaitingDbName;
                Outcome::none()
            }
            TokenKind::EndObject => {
                self.state = State::WaitingFileBegin;
                Outcome::none()
            }
            _ => unexpected("',' or '}'"),
        }
    }

    fn on_skipping_name_separator(&mut self, token: &Token) -> Outcome {
        match token.kind {
            TokenKind::NameSeparator => {
                self.state = State::SkippingDbValue { depth: 0 };
                Outcome::none()
            }
            _ => unexpected("':'"),
        }
    }

    /// Structurally skips the value of an unknown database: brackets are
    /// depth-tracked, everything else is consumed silently, and parsing
    /// resumes after the value closes.
    fn on_skipping_value(&mut self, token: &Token, depth: u32) -> Outcome {
        match token.kind {
            TokenKind::BeginObject | TokenKind::BeginArray => {
                self.state = State::SkippingDbValue { depth: depth + 1 };
                Outcome::none()
            }
            TokenKind::EndObject | TokenKind::EndArray => match depth {
                0 => unexpected("a value"),
                1 => {
                    self.state = State::WaitingDbArraySeparator;
                    Outcome::none()
                }
                _ => {
                    self.state = State::SkippingDbValue { depth: depth - 1 };
                    Outcome::none()
                }
            },
            TokenKind::String(_) | TokenKind::Number(_) if depth == 0 => {
                self.state = State::WaitingDbArraySeparator;
                Outcome::none()
            }
            _ => Outcome::none(),
        }
    }
}

fn unexpected(expected: &'static str) -> Outcome {
    Outcome::diag(DiagnosticKind::UnexpectedToken { expected })
}

/// Reads one catalog document and populates the catalogs.
///
/// Every malformed token or object is reported to `sink` and parsing
/// continues; nothing in the document content can fail this call. Records
/// with names already present in a catalog overwrite the existing entry.
pub fn parse_into(
    source: &str,
    waypoints: &mut WaypointCatalog,
    pois: &mut PoiCatalog,
    sink: &mut dyn DiagnosticSink,
) {
    let mut scanner = Scanner::new(source);
    let mut machine = Machine::new();

    loop {
        let token = match scanner.next_token() {
            Ok(Some(token)) => token,
            Ok(None) => break,
            Err(err) => {
                sink.report(Diagnostic::from(err));
                continue;
            }
        };

        let line = token.line;
        let outcome = machine.feed(&token);
        if let Some(kind) = outcome.diagnostic {
            sink.report(Diagnostic::new(line, kind));
        }
        match outcome.emit {
            Some(Record::Waypoint(waypoint)) => {
                waypoints.insert(waypoint);
            }
            Some(Record::Poi(poi)) => {
                pois.insert(poi);
            }
            None => {}
        }
    }
}
