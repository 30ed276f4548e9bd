// ── Wire -> domain conversions ──

use crately_api::models::{ItemCreateUpdate, ItemResponse};

use crate::command::ItemWriteRequest;
use crate::model::Item;

impl From<ItemResponse> for Item {
    fn from(wire: ItemResponse) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            quantity: wire.quantity,
            price: wire.price,
            category: wire.category,
        }
    }
}

impl From<&ItemWriteRequest> for ItemCreateUpdate {
    fn from(req: &ItemWriteRequest) -> Self {
        Self {
            name: req.name.clone(),
            quantity: req.quantity,
            price: req.price,
            category: req.category.clone(),
        }
    }
}
