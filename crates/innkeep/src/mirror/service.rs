use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use super::store::{DocumentFields, DocumentStore, FieldValue, MirrorError};

pub(crate) const GUESTS_COLLECTION: &str = "users";
pub(crate) const BOOKINGS_COLLECTION: &str = "bookings";

/// Snapshot of an authoritative guest record pushed to the mirror.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestRecord {
    pub guest_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

/// Snapshot of a booking pushed to the mirror.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    pub booking_id: String,
    pub guest_id: String,
    pub room: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub status: String,
    pub total_amount: f64,
}

/// One-directional push of authoritative records into the document store.
/// Full mirrors replace the document; updates merge field-by-field so fields
/// owned by other writers survive.
pub struct MirrorService<D> {
    store: Arc<D>,
}

impl<D> MirrorService<D>
where
    D: DocumentStore + 'static,
{
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    pub async fn mirror_guest(&self, guest: &GuestRecord) -> Result<(), MirrorError> {
        self.store
            .set(GUESTS_COLLECTION, &guest.guest_id, guest_fields(guest))
            .await?;
        info!(guest = %guest.guest_id, "guest record mirrored");
        Ok(())
    }

    pub async fn update_guest(
        &self,
        guest_id: &str,
        changes: DocumentFields,
    ) -> Result<(), MirrorError> {
        self.store.merge(GUESTS_COLLECTION, guest_id, changes).await
    }

    pub async fn mirror_booking(&self, booking: &BookingRecord) -> Result<(), MirrorError> {
        self.store
            .set(
                BOOKINGS_COLLECTION,
                &booking.booking_id,
                booking_fields(booking),
            )
            .await?;
        info!(booking = %booking.booking_id, "booking record mirrored");
        Ok(())
    }

    pub async fn update_booking(
        &self,
        booking_id: &str,
        changes: DocumentFields,
    ) -> Result<(), MirrorError> {
        self.store
            .merge(BOOKINGS_COLLECTION, booking_id, changes)
            .await
    }

    /// Deletion is not replicated. The authoritative store owns removal; the
    /// mirror only records that it was asked.
    pub async fn remove_guest(&self, guest_id: &str) -> Result<(), MirrorError> {
        warn!(guest = %guest_id, "mirror deletion requested but not implemented");
        Ok(())
    }

    /// Deletion is not replicated; see `remove_guest`.
    pub async fn remove_booking(&self, booking_id: &str) -> Result<(), MirrorError> {
        warn!(booking = %booking_id, "mirror deletion requested but not implemented");
        Ok(())
    }
}

fn guest_fields(guest: &GuestRecord) -> DocumentFields {
    let mut fields = DocumentFields::new();
    fields.insert("full_name".to_string(), FieldValue::Text(guest.full_name.clone()));
    fields.insert("email".to_string(), FieldValue::Text(guest.email.clone()));
    fields.insert("phone".to_string(), FieldValue::Text(guest.phone.clone()));
    fields.insert(
        "created_at".to_string(),
        FieldValue::Timestamp(guest.created_at),
    );
    fields
}

fn booking_fields(booking: &BookingRecord) -> DocumentFields {
    let mut fields = DocumentFields::new();
    fields.insert(
        "guest_id".to_string(),
        FieldValue::Text(booking.guest_id.clone()),
    );
    fields.insert("room".to_string(), FieldValue::Text(booking.room.clone()));
    fields.insert(
        "check_in".to_string(),
        FieldValue::Text(booking.check_in.to_string()),
    );
    fields.insert(
        "check_out".to_string(),
        FieldValue::Text(booking.check_out.to_string()),
    );
    fields.insert(
        "guests".to_string(),
        FieldValue::Integer(i64::from(booking.guests)),
    );
    fields.insert(
        "status".to_string(),
        FieldValue::Text(booking.status.clone()),
    );
    fields.insert(
        "total_amount".to_string(),
        FieldValue::Decimal(booking.total_amount),
    );
    fields
}
