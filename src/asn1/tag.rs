//! Tag classes and the universal tag table

use std::fmt;

/// Class bits of an identifier octet (top two bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl TagClass {
    /// Extract the class from an identifier octet
    pub fn from_identifier(octet: u8) -> Self {
        match octet >> 6 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        }
    }

    /// Class bits positioned for an identifier octet
    pub fn identifier_bits(self) -> u8 {
        match self {
            TagClass::Universal => 0x00,
            TagClass::Application => 0x40,
            TagClass::ContextSpecific => 0x80,
            TagClass::Private => 0xc0,
        }
    }
}

/// Semantic types assigned to universal tag numbers (X.680)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UniversalTag {
    EndOfContent = 0,
    Boolean = 1,
    Integer = 2,
    BitString = 3,
    OctetString = 4,
    Null = 5,
    ObjectIdentifier = 6,
    ObjectDescriptor = 7,
    External = 8,
    Real = 9,
    Enumerated = 10,
    EmbeddedPdv = 11,
    Utf8String = 12,
    RelativeOid = 13,
    Time = 14,
    Reserved = 15,
    Sequence = 16,
    Set = 17,
    NumericString = 18,
    PrintableString = 19,
    T61String = 20,
    VideotexString = 21,
    Ia5String = 22,
    UtcTime = 23,
    GeneralizedTime = 24,
    GraphicString = 25,
    VisibleString = 26,
    GeneralString = 27,
    UniversalString = 28,
    CharacterString = 29,
    BmpString = 30,
    Date = 31,
    TimeOfDay = 32,
    DateTime = 33,
    Duration = 34,
    OidIri = 35,
    RelativeOidIri = 36,
}

impl UniversalTag {
    const ALL: [UniversalTag; 37] = [
        UniversalTag::EndOfContent,
        UniversalTag::Boolean,
        UniversalTag::Integer,
        UniversalTag::BitString,
        UniversalTag::OctetString,
        UniversalTag::Null,
        UniversalTag::ObjectIdentifier,
        UniversalTag::ObjectDescriptor,
        UniversalTag::External,
        UniversalTag::Real,
        UniversalTag::Enumerated,
        UniversalTag::EmbeddedPdv,
        UniversalTag::Utf8String,
        UniversalTag::RelativeOid,
        UniversalTag::Time,
        UniversalTag::Reserved,
        UniversalTag::Sequence,
        UniversalTag::Set,
        UniversalTag::NumericString,
        UniversalTag::PrintableString,
        UniversalTag::T61String,
        UniversalTag::VideotexString,
        UniversalTag::Ia5String,
        UniversalTag::UtcTime,
        UniversalTag::GeneralizedTime,
        UniversalTag::GraphicString,
        UniversalTag::VisibleString,
        UniversalTag::GeneralString,
        UniversalTag::UniversalString,
        UniversalTag::CharacterString,
        UniversalTag::BmpString,
        UniversalTag::Date,
        UniversalTag::TimeOfDay,
        UniversalTag::DateTime,
        UniversalTag::Duration,
        UniversalTag::OidIri,
        UniversalTag::RelativeOidIri,
    ];

    /// Look up the universal type for a tag number
    pub fn from_number(number: u64) -> Option<Self> {
        usize::try_from(number)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn number(self) -> u64 {
        self as u64
    }

    pub fn name(self) -> &'static str {
        match self {
            UniversalTag::EndOfContent => "END OF CONTENT",
            UniversalTag::Boolean => "BOOLEAN",
            UniversalTag::Integer => "INTEGER",
            UniversalTag::BitString => "BIT STRING",
            UniversalTag::OctetString => "OCTET STRING",
            UniversalTag::Null => "NULL",
            UniversalTag::ObjectIdentifier => "OBJECT IDENTIFIER",
            UniversalTag::ObjectDescriptor => "ObjectDescriptor",
            UniversalTag::External => "EXTERNAL",
            UniversalTag::Real => "REAL",
            UniversalTag::Enumerated => "ENUMERATED",
            UniversalTag::EmbeddedPdv => "EMBEDDED PDV",
            UniversalTag::Utf8String => "UTF8String",
            UniversalTag::RelativeOid => "RELATIVE-OID",
            UniversalTag::Time => "TIME",
            UniversalTag::Reserved => "RESERVED",
            UniversalTag::Sequence => "SEQUENCE",
            UniversalTag::Set => "SET",
            UniversalTag::NumericString => "NumericString",
            UniversalTag::PrintableString => "PrintableString",
            UniversalTag::T61String => "T61String",
            UniversalTag::VideotexString => "VideotexString",
            UniversalTag::Ia5String => "IA5String",
            UniversalTag::UtcTime => "UTCTime",
            UniversalTag::GeneralizedTime => "GeneralizedTime",
            UniversalTag::GraphicString => "GraphicString",
            UniversalTag::VisibleString => "VisibleString",
            UniversalTag::GeneralString => "GeneralString",
            UniversalTag::UniversalString => "UniversalString",
            UniversalTag::CharacterString => "CHARACTER STRING",
            UniversalTag::BmpString => "BMPString",
            UniversalTag::Date => "DATE",
            UniversalTag::TimeOfDay => "TIME-OF-DAY",
            UniversalTag::DateTime => "DATE-TIME",
            UniversalTag::Duration => "DURATION",
            UniversalTag::OidIri => "OID-IRI",
            UniversalTag::RelativeOidIri => "RELATIVE-OID-IRI",
        }
    }
}

impl fmt::Display for UniversalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
