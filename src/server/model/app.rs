use sea_orm::DatabaseConnection;

use crate::server::{
    messaging::MessagingClient, service::invoice::InvoiceRenderer, worker::Worker,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub messaging: MessagingClient,
    pub renderer: InvoiceRenderer,
    pub worker: Worker,
}
