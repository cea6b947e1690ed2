//! Slot kinds
//!
//! A slot's kind decides which extraction rule fills it. The kind is read
//! from the slot name and description; the first matching check wins.

use crate::types::ParameterSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    PersonName,
    MathExpression,
    DepartureStation,
    ArrivalStation,
    Station,
    Destination,
    Location,
    HotelName,
    GuestCount,
    RoomCount,
    CheckinDate,
    CheckoutDate,
    Date,
    TimeOfDay,
    Unknown,
}

impl SlotKind {
    /// Classify a slot
    ///
    /// `lodging` tells whether the request mentions somewhere to stay; a
    /// `location` slot is only treated as a location when it does.
    pub fn classify(slot: &ParameterSlot, lodging: bool) -> Self {
        let name = slot.name.to_lowercase();
        let description = slot.description.to_lowercase();

        if name == "name" && description.contains("name") {
            SlotKind::PersonName
        } else if name == "expression" && description.contains("math") {
            SlotKind::MathExpression
        } else if name.contains("from_station") {
            SlotKind::DepartureStation
        } else if name.contains("to_station") {
            SlotKind::ArrivalStation
        } else if name.contains("station") || description.contains("station") {
            SlotKind::Station
        } else if name == "destination" || description.contains("destination") {
            SlotKind::Destination
        } else if name == "location" && lodging {
            SlotKind::Location
        } else if name == "hotel_name" || description.contains("hotel") {
            SlotKind::HotelName
        } else if name == "guests" || description.contains("guest") {
            SlotKind::GuestCount
        } else if name == "rooms" || description.contains("room") {
            SlotKind::RoomCount
        } else if name.contains("checkin") {
            SlotKind::CheckinDate
        } else if name.contains("checkout") {
            SlotKind::CheckoutDate
        } else if name == "date" || description.contains("date") {
            SlotKind::Date
        } else if name == "time" || description.contains("time") {
            SlotKind::TimeOfDay
        } else {
            SlotKind::Unknown
        }
    }
}
