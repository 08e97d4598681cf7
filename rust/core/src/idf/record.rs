// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generic IDF object and its text rendering.

use std::fmt;

use zonekit_geometry::{Point3, Polyloop};

/// Column at which field comments start
const COMMENT_COLUMN: usize = 30;

/// One field of an IDF object
#[derive(Debug, Clone, PartialEq)]
pub struct IdfField {
    pub value: String,
    pub comment: String,
}

/// One IDF object: a class name and ordered fields
#[derive(Debug, Clone, PartialEq)]
pub struct IdfObject {
    class: &'static str,
    fields: Vec<IdfField>,
}

impl IdfObject {
    pub fn new(class: &'static str) -> Self {
        Self {
            class,
            fields: Vec::new(),
        }
    }

    /// Append a field
    pub fn field(mut self, comment: impl Into<String>, value: impl fmt::Display) -> Self {
        self.fields.push(IdfField {
            value: value.to_string(),
            comment: comment.into(),
        });
        self
    }

    /// Append a vertex count field followed by one field per coordinate
    pub fn vertices(mut self, ring: &Polyloop) -> Self {
        self = self.field("Number of Vertices", ring.len());
        for (i, p) in ring.vertices().iter().enumerate() {
            self = self.vertex(i + 1, p);
        }
        self
    }

    fn vertex(self, index: usize, p: &Point3<f64>) -> Self {
        self.field(format!("Vertex {index} X-coordinate {{m}}"), num(p.x))
            .field(format!("Vertex {index} Y-coordinate {{m}}"), num(p.y))
            .field(format!("Vertex {index} Z-coordinate {{m}}"), num(p.z))
    }

    pub fn class(&self) -> &'static str {
        self.class
    }

    pub fn fields(&self) -> &[IdfField] {
        &self.fields
    }

    /// First field, which is the object name for named classes
    pub fn name(&self) -> Option<&str> {
        self.fields.first().map(|f| f.value.as_str())
    }

    /// Value of the field at `index`
    pub fn value(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|f| f.value.as_str())
    }
}

impl fmt::Display for IdfObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return writeln!(f, "{};", self.class);
        }

        writeln!(f, "{},", self.class)?;
        let last = self.fields.len() - 1;
        for (i, field) in self.fields.iter().enumerate() {
            let terminator = if i == last { ';' } else { ',' };
            let value = format!("{}{}", field.value, terminator);
            if field.comment.is_empty() {
                writeln!(f, "  {value}")?;
            } else {
                writeln!(f, "  {:<width$} !- {}", value, field.comment, width = COMMENT_COLUMN)?;
            }
        }
        Ok(())
    }
}

/// Render a number without trailing noise, `-0` printed as `0`
pub fn num(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
