use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::InvalidTransition;

/// Escrow state of a payment.
///
/// `COMPLITED` is the value the marketplace has always persisted, kept as-is for
/// compatibility with existing rows and clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "RESERVED")]
    #[serde(rename = "RESERVED")]
    Reserved,
    #[sea_orm(string_value = "COMPLITED")]
    #[serde(rename = "COMPLITED")]
    Completed,
    #[sea_orm(string_value = "REFUNDED")]
    #[serde(rename = "REFUNDED")]
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentEvent {
    /// Escrow released to the recipient.
    Release,
    /// Escrow returned to the sender.
    Refund,
}

impl PaymentStatus {
    /// Settlement is one-way: nothing leads back to RESERVED.
    pub fn transition(self, event: PaymentEvent) -> Result<Self, InvalidTransition> {
        match (self, event) {
            (PaymentStatus::Reserved, PaymentEvent::Release) => Ok(PaymentStatus::Completed),
            (PaymentStatus::Reserved, PaymentEvent::Refund) => Ok(PaymentStatus::Refunded),
            (from, event) => Err(InvalidTransition {
                entity: "payment",
                from: from.as_str().to_string(),
                event: match event {
                    PaymentEvent::Release => "release",
                    PaymentEvent::Refund => "refund",
                }
                .to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Reserved => "RESERVED",
            PaymentStatus::Completed => "COMPLITED",
            PaymentStatus::Refunded => "REFUNDED",
        }
    }
}

/// SeaORM entity for the `payments` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub project_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    /// Percentage. Stored but not applied during settlement.
    #[sea_orm(column_type = "Decimal(Some((3, 1)))")]
    pub commission: Decimal,
    pub status: PaymentStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
