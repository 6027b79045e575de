//! The fixed-shape record extracted from one order form.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// A field of the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Contract number (Ctto).
    Contract,
    /// Person who placed the order (Solicitante).
    Requester,
    /// Requester phone number.
    Phone,
    /// Name of the deceased (Fallecido).
    Deceased,
    /// Service type (Tipo de Servicio).
    ServiceType,
    /// Date the order was placed.
    RequestDate,
    /// Date the canvas must be delivered.
    DeliveryDate,
    /// Delivery place.
    DeliveryPlace,
    /// Delivery time.
    DeliveryTime,
    /// Room (Sala).
    Room,
    /// Coordinator in charge.
    Coordinator,
    /// Canvas size, `WIDTH*HEIGHT`.
    Size,
    /// Frame model code.
    FrameModel,
    /// Background model.
    Background,
    /// Requested retouches.
    Retouches,
    /// Price in bolivianos, digits only.
    Price,
}

impl Field {
    /// Number of fields in a record.
    pub const COUNT: usize = 16;

    /// All fields, in record order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::Contract,
        Field::Requester,
        Field::Phone,
        Field::Deceased,
        Field::ServiceType,
        Field::RequestDate,
        Field::DeliveryDate,
        Field::DeliveryPlace,
        Field::DeliveryTime,
        Field::Room,
        Field::Coordinator,
        Field::Size,
        Field::FrameModel,
        Field::Background,
        Field::Retouches,
        Field::Price,
    ];

    /// Position of the field in the record.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Key used for serialization and the CSV header.
    pub fn name(self) -> &'static str {
        match self {
            Field::Contract => "Contract",
            Field::Requester => "Requester",
            Field::Phone => "Phone",
            Field::Deceased => "Deceased",
            Field::ServiceType => "ServiceType",
            Field::RequestDate => "RequestDate",
            Field::DeliveryDate => "DeliveryDate",
            Field::DeliveryPlace => "DeliveryPlace",
            Field::DeliveryTime => "DeliveryTime",
            Field::Room => "Room",
            Field::Coordinator => "Coordinator",
            Field::Size => "Size",
            Field::FrameModel => "FrameModel",
            Field::Background => "Background",
            Field::Retouches => "Retouches",
            Field::Price => "Price",
        }
    }

    /// Label as printed on the paper form.
    pub fn label(self) -> &'static str {
        match self {
            Field::Contract => "Ctto",
            Field::Requester => "Solicitante",
            Field::Phone => "Teléfono",
            Field::Deceased => "Fallecido",
            Field::ServiceType => "Tipo de Servicio",
            Field::RequestDate => "Fecha de Solicitud",
            Field::DeliveryDate => "Fecha Entrega",
            Field::DeliveryPlace => "Lugar de Entrega",
            Field::DeliveryTime => "Hora de Entrega",
            Field::Room => "Sala",
            Field::Coordinator => "Coordinador",
            Field::Size => "Tamaño",
            Field::FrameModel => "Modelo de Marco",
            Field::Background => "Modelo de Fondo",
            Field::Retouches => "Retoques",
            Field::Price => "PRECIO Bs.",
        }
    }

    /// Uppercase keywords that announce the field on a line.
    ///
    /// Alternates are tried in order; the first one found in the line wins.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Field::Contract => &["CTTO", "CONTRATO"],
            Field::Requester => &["SOLICITANTE"],
            Field::Phone => &["TELEFONO", "TELÉFONO"],
            Field::Deceased => &["FALLECIDO"],
            Field::ServiceType => &["TIPO DE SERVICIO"],
            Field::RequestDate => &["FECHA DE SOLICITUD"],
            Field::DeliveryDate => &["FECHA DE ENTREGA", "FECHA ENTREGA"],
            Field::DeliveryPlace => &["LUGAR DE ENTREGA"],
            Field::DeliveryTime => &["HORA DE ENTREGA"],
            Field::Room => &["SALA"],
            Field::Coordinator => &["COORDINADOR"],
            Field::Size => &["TAMAÑO", "TAMANO"],
            Field::FrameModel => &["MODELO DE MARCO"],
            Field::Background => &["MODELO DE FONDO"],
            Field::Retouches => &["RETOQUES"],
            Field::Price => &["PRECIO"],
        }
    }

    /// Look a field up by its serialization key.
    pub fn from_name(name: &str) -> Option<Self> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured result extracted from one image's OCR text.
///
/// Every field is always present; a field that was not detected holds `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: [String; Field::COUNT],
}

impl Record {
    /// Create a record with every field empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field.
    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Overwrite the value of a field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Builder-style variant of [`Record::set`].
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Iterate over `(field, value)` pairs in record order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    /// Fields that were left empty.
    pub fn missing_fields(&self) -> Vec<Field> {
        self.iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect()
    }

    /// Number of fields holding a value.
    pub fn filled_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_empty()).count()
    }

    /// Check if no field holds a value.
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Render the record as `Label: value` lines for display.
    pub fn display_text(&self) -> String {
        let mut output = String::new();
        for (field, value) in self.iter() {
            output.push_str(field.label());
            output.push_str(": ");
            output.push_str(value);
            output.push('\n');
        }
        output
    }
}

impl Index<Field> for Record {
    type Output = str;

    fn index(&self, field: Field) -> &str {
        self.get(field)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    /// Unknown keys are ignored and missing keys stay empty, so the
    /// field set of a deserialized record is still exactly [`Field::ALL`].
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, String>::deserialize(deserializer)?;
        let mut record = Record::new();
        for (key, value) in raw {
            if let Some(field) = Field::from_name(&key) {
                record.set(field, value);
            }
        }
        Ok(record)
    }
}
