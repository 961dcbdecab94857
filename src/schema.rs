//! Diesel table definitions for the normalized supply-chain schema.
//!
//! Mirrors the DDL in [`crate::schema_init`]: five tables keyed on SKU, with
//! `sales`/`logistics`/`production` referencing `products.sku`.

diesel::table! {
    products (id) {
        id -> Integer,
        product_type -> Varchar,
        sku -> Varchar,
        price -> Double,
        availability -> Integer,
        stock_levels -> Integer,
        created_at -> Timestamp,
    }
}

diesel::table! {
    suppliers (id) {
        id -> Integer,
        supplier_name -> Varchar,
        location -> Varchar,
        lead_time -> Integer,
        created_at -> Timestamp,
    }
}

diesel::table! {
    sales (id) {
        id -> Integer,
        sku -> Varchar,
        products_sold -> Integer,
        revenue_generated -> Double,
        customer_demographics -> Varchar,
        created_at -> Timestamp,
    }
}

diesel::table! {
    logistics (id) {
        id -> Integer,
        sku -> Varchar,
        shipping_times -> Integer,
        shipping_carrier -> Varchar,
        shipping_costs -> Double,
        transportation_mode -> Varchar,
        route -> Varchar,
        total_costs -> Double,
        created_at -> Timestamp,
    }
}

diesel::table! {
    production (id) {
        id -> Integer,
        sku -> Varchar,
        production_volumes -> Integer,
        manufacturing_lead_time -> Integer,
        manufacturing_costs -> Double,
        inspection_results -> Varchar,
        defect_rates -> Double,
        created_at -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(products, suppliers, sales, logistics, production,);
