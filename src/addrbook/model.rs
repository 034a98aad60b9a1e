//! Core record type: one person in the address book.
//!
//! First and last name are fixed when a [`Person`] is created; everything else
//! lives in [`ContactInfo`] and is replaced as a unit by [`Person::update`].

use std::cmp::Ordering;

/// Labels for the seven fields of a new person, in input order.
pub const PERSON_FIELDS: [&str; 7] = [
    "First Name",
    "Last Name",
    "Address",
    "City",
    "State",
    "ZIP",
    "Phone",
];

/// Labels for the five fields that can change after creation.
pub const CONTACT_FIELDS: [&str; 5] = ["Address", "City", "State", "ZIP", "Phone"];

/// Builds the lookup key for a first/last name pair: `"<last>, <first>"`.
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{}, {}", last_name, first_name)
}

/// The mutable part of a person's record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
}

impl ContactInfo {
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
            phone: phone.into(),
        }
    }

    /// Values in the order of [`CONTACT_FIELDS`].
    pub fn to_values(&self) -> Vec<String> {
        vec![
            self.address.clone(),
            self.city.clone(),
            self.state.clone(),
            self.zip.clone(),
            self.phone.clone(),
        ]
    }

    /// Inverse of [`ContactInfo::to_values`]. Missing trailing values become empty.
    pub fn from_values(values: &[String]) -> Self {
        let field = |i: usize| values.get(i).cloned().unwrap_or_default();
        Self {
            address: field(0),
            city: field(1),
            state: field(2),
            zip: field(3),
            phone: field(4),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    first_name: String,
    last_name: String,
    info: ContactInfo,
}

impl Person {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        info: ContactInfo,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            info,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn address(&self) -> &str {
        &self.info.address
    }

    pub fn city(&self) -> &str {
        &self.info.city
    }

    pub fn state(&self) -> &str {
        &self.info.state
    }

    pub fn zip(&self) -> &str {
        &self.info.zip
    }

    pub fn phone(&self) -> &str {
        &self.info.phone
    }

    pub fn info(&self) -> &ContactInfo {
        &self.info
    }

    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    /// Replaces all five contact fields. The name never changes.
    pub fn update(&mut self, info: ContactInfo) {
        self.info = info;
    }

    /// True if `criterion` occurs verbatim (case-sensitive) in any field.
    pub fn contains(&self, criterion: &str) -> bool {
        self.fields().iter().any(|field| field.contains(criterion))
    }

    /// All seven fields in input order.
    pub fn fields(&self) -> [&str; 7] {
        [
            &self.first_name,
            &self.last_name,
            &self.info.address,
            &self.info.city,
            &self.info.state,
            &self.info.zip,
            &self.info.phone,
        ]
    }

    /// Alphabetical by last name, then first name.
    pub fn cmp_by_name(&self, other: &Person) -> Ordering {
        self.last_name
            .cmp(&other.last_name)
            .then_with(|| self.first_name.cmp(&other.first_name))
    }

    /// By zip, ties broken by name.
    pub fn cmp_by_zip(&self, other: &Person) -> Ordering {
        self.info
            .zip
            .cmp(&other.info.zip)
            .then_with(|| self.cmp_by_name(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(first: &str, last: &str, zip: &str) -> Person {
        Person::new(
            first,
            last,
            ContactInfo::new("1 Main St", "Wenham", "MA", zip, "555-0100"),
        )
    }

    #[test]
    fn full_name_is_last_comma_first() {
        assert_eq!(person("George", "Gopher", "01936").full_name(), "Gopher, George");
        assert_eq!(full_name("George", "Gopher"), "Gopher, George");
    }

    #[test]
    fn update_replaces_contact_fields_only() {
        let mut p = person("George", "Gopher", "01936");
        p.update(ContactInfo::new("Tunnel 38", "Hamilton", "MA", "01982", "468-0000"));
        assert_eq!(p.full_name(), "Gopher, George");
        assert_eq!(p.address(), "Tunnel 38");
        assert_eq!(p.zip(), "01982");
        assert_eq!(p.phone(), "468-0000");
    }

    #[test]
    fn contains_checks_every_field_case_sensitively() {
        let p = person("George", "Gopher", "01936");
        assert!(p.contains("Geo"));
        assert!(p.contains("Goph"));
        assert!(p.contains("Main"));
        assert!(p.contains("Wenham"));
        assert!(p.contains("MA"));
        assert!(p.contains("019"));
        assert!(p.contains("0100"));
        assert!(!p.contains("gopher"));
        assert!(!p.contains("Beverly"));
    }

    #[test]
    fn empty_criterion_matches() {
        assert!(person("A", "B", "1").contains(""));
    }

    #[test]
    fn name_order_uses_last_then_first() {
        let cat_charlene = person("Charlene", "Cat", "01938");
        let cat_clarence = person("Clarence", "Cat", "01938");
        let aardvark = person("Anthony", "Aardvark", "01984");

        assert_eq!(aardvark.cmp_by_name(&cat_charlene), Ordering::Less);
        assert_eq!(cat_charlene.cmp_by_name(&cat_clarence), Ordering::Less);
        assert_eq!(cat_clarence.cmp_by_name(&cat_clarence.clone()), Ordering::Equal);
    }

    #[test]
    fn zip_order_breaks_ties_by_name() {
        let buffalo = person("Boris", "Buffalo", "01936");
        let gopher = person("George", "Gopher", "01936");
        let zebra = person("Zelda", "Zebra", "01915");

        assert_eq!(zebra.cmp_by_zip(&buffalo), Ordering::Less);
        assert_eq!(buffalo.cmp_by_zip(&gopher), Ordering::Less);
        assert_eq!(gopher.cmp_by_zip(&buffalo), Ordering::Greater);
    }

    #[test]
    fn contact_values_round_trip_through_field_order() {
        let info = ContactInfo::new("a", "b", "c", "d", "e");
        let values = info.to_values();
        assert_eq!(values, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(ContactInfo::from_values(&values), info);
        assert_eq!(
            ContactInfo::from_values(&["x".to_string()]),
            ContactInfo::new("x", "", "", "", "")
        );
    }
}
