pub mod canales;
pub mod clientes;
pub mod fechas;
pub mod habitaciones;
pub mod health;
pub mod hoteles;
pub mod login;
pub mod pagos;
pub mod reservas;
pub mod tipos_hab;
pub mod types;

pub use self::canales::list_canales;
pub use self::clientes::{create_cliente, list_clientes};
pub use self::fechas::{create_fecha, list_fechas};
pub use self::habitaciones::{create_habitacion, list_habitaciones};
pub use self::health::health;
pub use self::hoteles::{create_hotel, list_hoteles};
pub use self::login::login;
pub use self::pagos::list_pagos;
pub use self::reservas::{create_reserva, list_reservas};
pub use self::tipos_hab::list_tipos_hab;
