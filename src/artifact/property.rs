use std::mem::discriminant;

use crate::geometry::{GeomObject, TypeTag};
use crate::math::{Point3, Vector3};

/// A typed attribute value shown in an inspection UI.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Scalar(f64),
    Count(usize),
    Point(Point3),
    Vector(Vector3),
    Text(String),
}

/// One named attribute of an object.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: &'static str,
    pub value: PropertyValue,
}

/// Structured, editable description of an object's attributes.
///
/// Edits change the descriptor only; applying them to the geometry is the
/// job of whatever owns the editing UI.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    kind: TypeTag,
    index: usize,
    entries: Vec<Property>,
}

impl PropertyDescriptor {
    /// Describes `object`, stored at slot `index`.
    #[must_use]
    pub fn for_object(object: &GeomObject, index: usize) -> Self {
        use PropertyValue::{Count, Point, Scalar, Text, Vector};

        let category = if object.as_curve().is_some() {
            "curve"
        } else if object.as_surface().is_some() {
            "surface"
        } else {
            "points"
        };
        let mut entries = vec![
            prop("type", Text(object.type_tag().name().to_owned())),
            prop("category", Text(category.to_owned())),
            prop("dimension", Count(object.dimension())),
        ];

        match object {
            GeomObject::LineSegment(s) => {
                entries.push(prop("start", Point(*s.start())));
                entries.push(prop("end", Point(*s.end())));
                entries.push(prop("length", Scalar(s.length())));
            }
            GeomObject::CircularArc(a) => {
                let (start, end) = a.angles();
                entries.push(prop("center", Point(*a.center())));
                entries.push(prop("radius", Scalar(a.radius())));
                entries.push(prop("normal", Vector(*a.normal())));
                entries.push(prop("start_angle", Scalar(start)));
                entries.push(prop("end_angle", Scalar(end)));
            }
            GeomObject::PlanePatch(p) => {
                entries.push(prop("origin", Point(*p.origin())));
                entries.push(prop("normal", Vector(*p.plane_normal())));
                entries.push(prop("area", Scalar(p.area())));
            }
            GeomObject::Sphere(s) => {
                entries.push(prop("center", Point(*s.center())));
                entries.push(prop("radius", Scalar(s.radius())));
                entries.push(prop("area", Scalar(s.area())));
            }
            GeomObject::PointCloud(c) => {
                entries.push(prop("points", Count(c.len())));
            }
        }

        Self {
            kind: object.type_tag(),
            index,
            entries,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TypeTag {
        self.kind
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn entries(&self) -> &[Property] {
        &self.entries
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Replaces the value of attribute `name`.
    ///
    /// Returns `false` (and changes nothing) if there is no such attribute
    /// or `value` has a different type than the current one.
    pub fn set(&mut self, name: &str, value: PropertyValue) -> bool {
        match self.entries.iter_mut().find(|p| p.name == name) {
            Some(entry) if discriminant(&entry.value) == discriminant(&value) => {
                entry.value = value;
                true
            }
            _ => false,
        }
    }
}

fn prop(name: &'static str, value: PropertyValue) -> Property {
    Property { name, value }
}
