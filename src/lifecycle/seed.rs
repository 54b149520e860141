//! Demo records for the offline in-memory store.

use serde_json::{json, Value};

pub fn demo_products() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "name": "Wireless Earbuds",
            "description": "Noise-cancelling earbuds with a 24 hour charging case",
            "category": "Audio",
            "price": 79.99,
            "stock": 42,
            "image": "https://images.example.com/products/earbuds.jpg",
            "featured": true
        }),
        json!({
            "id": 2,
            "name": "Smart Watch",
            "description": "Fitness tracking, notifications and a week of battery",
            "category": "Wearables",
            "price": 199.0,
            "stock": 7,
            "image": "https://images.example.com/products/watch.jpg",
            "featured": true
        }),
        json!({
            "id": 3,
            "name": "USB-C Hub",
            "description": "Seven ports including HDMI and SD card reader",
            "category": "Accessories",
            "price": 34.5,
            "stock": 120,
            "image": "https://images.example.com/products/hub.jpg",
            "featured": false
        }),
        json!({
            "id": 4,
            "name": "Studio Monitor",
            "description": "Near-field speaker for mixing and mastering",
            "category": "Audio",
            "price": 349.0,
            "stock": 3,
            "image": "https://images.example.com/products/monitor.jpg",
            "featured": false
        }),
    ]
}

pub fn demo_store_info() -> Vec<Value> {
    vec![json!({
        "id": 1,
        "name": "TechGear Pro",
        "description": "Gadgets and accessories for work and play",
        "phone": "(555) 010-0100",
        "email": "hello@techgear.example.com",
        "address": "100 Market Street, Springfield"
    })]
}
