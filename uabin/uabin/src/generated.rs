//! Definitions generated by `build.rs` from `schema/Opc.Ua.Types.json` and
//! `schema/NodeIds.csv`.

/// Numeric identifiers of namespace 0.
pub mod id {
    include!(concat!(env!("OUT_DIR"), "/id_gen.rs"));
}

pub mod enums {
    include!(concat!(env!("OUT_DIR"), "/enums_gen.rs"));
}

/// Extension object structures and the request/response capabilities.
pub mod types {
    include!(concat!(env!("OUT_DIR"), "/extobjs_gen.rs"));
}

pub mod register {
    mod extension_objects {
        include!(concat!(env!("OUT_DIR"), "/register_extobjs_gen.rs"));
    }

    mod services {
        include!(concat!(env!("OUT_DIR"), "/service_gen.rs"));
    }

    pub use extension_objects::register_extension_objects;
    pub use services::register_services;
}
