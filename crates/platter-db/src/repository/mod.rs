//! # Repository Module
//!
//! Database repository implementations for the Platter ordering backend.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.orders().place_order(&new_order)                           │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── place_order(&self, req)      ← one transaction, all or nothing   │
//! │  ├── get_detail(&self, id)                                             │
//! │  └── update_status(&self, id, s)                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Transaction boundaries live next to the queries they guard          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customer registration and lookups
//! - [`restaurant::RestaurantRepository`] - Restaurant registration and lookups
//! - [`menu_item::MenuItemRepository`] - Menu CRUD and partial updates
//! - [`order::OrderRepository`] - Order placement workflow and status machine
//! - [`report::ReportRepository`] - Revenue and ranking aggregation

pub mod customer;
pub mod menu_item;
pub mod order;
pub mod report;
pub mod restaurant;
