//! Request and response shapes for the API.
//!
//! Wire field names keep the exact casing the dimensional schema and the
//! frontend use (`HotelKey`, `HotelID`, `Año`, ...), so every struct carries
//! serde renames. One canonical output shape exists per entity; nested
//! entities in a reservation reuse those shapes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub usuario: String,
    #[serde(rename = "contraseña")]
    pub contrasena: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub mensaje: String,
    pub rol: String,
    #[serde(rename = "EmpKey")]
    pub emp_key: i32,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct HotelIn {
    #[serde(rename = "HotelID")]
    pub hotel_id: i32,
    pub nombre: String,
    pub cadena: String,
    pub ciudad: String,
    pub pais: String,
    pub estrellas: i32,
    pub direccion: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct HotelOut {
    pub hotel_key: i32,
    #[serde(rename = "HotelID")]
    pub hotel_id: i32,
    pub nombre: String,
    pub cadena: String,
    pub ciudad: String,
    pub pais: String,
    pub estrellas: i32,
    pub direccion: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ClienteIn {
    pub nombre: String,
    pub apellido: String,
    pub genero: String,
    pub nacionalidad: String,
    pub tipo_cliente: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ClienteOut {
    pub cliente_key: i32,
    #[serde(rename = "ClienteID")]
    pub cliente_id: i32,
    pub nombre: String,
    pub apellido: String,
    pub genero: String,
    pub nacionalidad: String,
    pub tipo_cliente: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct TipoHabOut {
    pub tipo_hab_key: i32,
    #[serde(rename = "TipoHabID")]
    pub tipo_hab_id: i32,
    pub descripcion: String,
    pub categoria: String,
    pub capacidad_max: i32,
    pub tarifa_estandar: Decimal,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct HabitacionIn {
    #[serde(rename = "HabitacionID")]
    pub habitacion_id: i32,
    pub hotel_key: i32,
    pub tipo_hab_key: i32,
    pub numero_hab: i32,
    pub piso: i32,
    pub capacidad: i32,
    pub vista: bool,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct HabitacionOut {
    pub habitacion_key: i32,
    #[serde(rename = "HabitacionID")]
    pub habitacion_id: i32,
    pub numero_hab: i32,
    pub piso: i32,
    pub capacidad: i32,
    pub vista: bool,
    pub tipo_hab: TipoHabOut,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct FechaIn {
    pub fecha: NaiveDate,
    #[serde(rename = "Año")]
    pub anio: i32,
    pub trimestre: i32,
    pub mes: i32,
    pub dia: i32,
    pub dia_semana: String,
    pub es_fin_de_semana: bool,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct FechaOut {
    pub fecha_key: i32,
    pub fecha: NaiveDate,
    #[serde(rename = "Año")]
    pub anio: i32,
    pub trimestre: i32,
    pub mes: i32,
    pub dia: i32,
    pub dia_semana: String,
    pub es_fin_de_semana: bool,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct CanalReservaOut {
    pub canal_key: i32,
    #[serde(rename = "CanalID")]
    pub canal_id: i32,
    pub nombre_canal: String,
    pub descripcion: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct PagoOut {
    pub pago_key: i32,
    #[serde(rename = "PagoID")]
    pub pago_id: i32,
    pub metodo: String,
    pub moneda: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ReservaIn {
    pub hotel_key: i32,
    pub cliente_key: i32,
    pub hab_key: i32,
    pub fecha_key: i32,
    pub emp_key: i32,
    pub canal_key: i32,
    pub pago_key: i32,
    pub noches_reservadas: i32,
    pub cantidad_huespedes: i32,
    pub ingreso_habitacion: Decimal,
    pub ingreso_servicios: Decimal,
    pub descuento_total: Decimal,
    pub impuesto_total: Decimal,
    pub lead_time_reserva: i32,
    pub ingreso_total: Decimal,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ReservaOut {
    pub reserva_key: i32,
    pub hotel: HotelOut,
    pub cliente: ClienteOut,
    pub habitacion: HabitacionOut,
    pub fecha: FechaOut,
    pub emp_key: i32,
    pub canal_key: i32,
    pub pago_key: i32,
    pub noches_reservadas: i32,
    pub cantidad_huespedes: i32,
    pub ingreso_habitacion: Decimal,
    pub ingreso_servicios: Decimal,
    pub descuento_total: Decimal,
    pub impuesto_total: Decimal,
    pub lead_time_reserva: i32,
    pub ingreso_total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_request_wire_names() {
        let request: LoginRequest = serde_json::from_value(json!({
            "usuario": "mgarcia",
            "contraseña": "secreto123",
        }))
        .expect("login request");
        assert_eq!(request.usuario, "mgarcia");
        assert_eq!(request.contrasena, "secreto123");
    }

    #[test]
    fn login_response_wire_names() {
        let response = LoginResponse {
            mensaje: "Inicio de sesión exitoso".to_string(),
            rol: "empleado".to_string(),
            emp_key: 7,
        };
        let value = serde_json::to_value(&response).expect("login response");
        assert_eq!(
            value,
            json!({
                "mensaje": "Inicio de sesión exitoso",
                "rol": "empleado",
                "EmpKey": 7,
            })
        );
    }

    #[test]
    fn hotel_out_wire_names() {
        let hotel = HotelOut {
            hotel_key: 3,
            hotel_id: 301,
            nombre: "Plaza".to_string(),
            cadena: "Andina".to_string(),
            ciudad: "Lima".to_string(),
            pais: "Perú".to_string(),
            estrellas: 4,
            direccion: "Av. Larco 123".to_string(),
        };
        let value = serde_json::to_value(&hotel).expect("hotel");
        assert_eq!(value["HotelKey"], 3);
        assert_eq!(value["HotelID"], 301);
        assert_eq!(value["Nombre"], "Plaza");
        assert_eq!(value["Estrellas"], 4);
    }

    #[test]
    fn fecha_out_keeps_anio_spelling() {
        let fecha = FechaOut {
            fecha_key: 1,
            fecha: NaiveDate::from_ymd_opt(2025, 7, 19).expect("date"),
            anio: 2025,
            trimestre: 3,
            mes: 7,
            dia: 19,
            dia_semana: "sábado".to_string(),
            es_fin_de_semana: true,
        };
        let value = serde_json::to_value(&fecha).expect("fecha");
        assert_eq!(value["Año"], 2025);
        assert_eq!(value["Fecha"], "2025-07-19");
        assert_eq!(value["EsFinDeSemana"], true);
    }

    #[test]
    fn decimals_keep_two_fractional_digits() {
        let tipo = TipoHabOut {
            tipo_hab_key: 2,
            tipo_hab_id: 20,
            descripcion: "Doble con vista".to_string(),
            categoria: "Doble".to_string(),
            capacidad_max: 3,
            tarifa_estandar: Decimal::new(123450, 2),
        };
        let value = serde_json::to_value(&tipo).expect("tipo");
        assert_eq!(value["TarifaEstandar"], "1234.50");
    }

    #[test]
    fn reserva_out_nests_entities() {
        let reserva = ReservaOut {
            reserva_key: 11,
            hotel: HotelOut {
                hotel_key: 3,
                hotel_id: 301,
                nombre: "Plaza".to_string(),
                cadena: "Andina".to_string(),
                ciudad: "Lima".to_string(),
                pais: "Perú".to_string(),
                estrellas: 4,
                direccion: "Av. Larco 123".to_string(),
            },
            cliente: ClienteOut {
                cliente_key: 5,
                cliente_id: 1005,
                nombre: "Ana".to_string(),
                apellido: "Quispe".to_string(),
                genero: "F".to_string(),
                nacionalidad: "PE".to_string(),
                tipo_cliente: "Frecuente".to_string(),
            },
            habitacion: HabitacionOut {
                habitacion_key: 9,
                habitacion_id: 409,
                numero_hab: 409,
                piso: 4,
                capacidad: 2,
                vista: true,
                tipo_hab: TipoHabOut {
                    tipo_hab_key: 2,
                    tipo_hab_id: 20,
                    descripcion: "Doble con vista".to_string(),
                    categoria: "Doble".to_string(),
                    capacidad_max: 3,
                    tarifa_estandar: Decimal::new(35000, 2),
                },
            },
            fecha: FechaOut {
                fecha_key: 4,
                fecha: NaiveDate::from_ymd_opt(2025, 7, 19).expect("date"),
                anio: 2025,
                trimestre: 3,
                mes: 7,
                dia: 19,
                dia_semana: "sábado".to_string(),
                es_fin_de_semana: true,
            },
            emp_key: 7,
            canal_key: 1,
            pago_key: 2,
            noches_reservadas: 2,
            cantidad_huespedes: 2,
            ingreso_habitacion: Decimal::new(70000, 2),
            ingreso_servicios: Decimal::new(12000, 2),
            descuento_total: Decimal::new(5000, 2),
            impuesto_total: Decimal::new(13860, 2),
            lead_time_reserva: 15,
            ingreso_total: Decimal::new(90860, 2),
        };
        let value = serde_json::to_value(&reserva).expect("reserva");
        assert_eq!(value["ReservaKey"], 11);
        assert_eq!(value["Hotel"]["Nombre"], "Plaza");
        assert_eq!(value["Cliente"]["Apellido"], "Quispe");
        assert_eq!(value["Habitacion"]["TipoHab"]["Categoria"], "Doble");
        assert_eq!(value["Fecha"]["Año"], 2025);
        assert_eq!(value["HabKey"], json!(null));
        assert_eq!(value["IngresoTotal"], "908.60");
    }

    #[test]
    fn reserva_in_parses_wire_payload() {
        let reserva: ReservaIn = serde_json::from_value(json!({
            "HotelKey": 3,
            "ClienteKey": 5,
            "HabKey": 9,
            "FechaKey": 4,
            "EmpKey": 7,
            "CanalKey": 1,
            "PagoKey": 2,
            "NochesReservadas": 2,
            "CantidadHuespedes": 2,
            "IngresoHabitacion": "700.00",
            "IngresoServicios": "120.00",
            "DescuentoTotal": "50.00",
            "ImpuestoTotal": "138.60",
            "LeadTimeReserva": 15,
            "IngresoTotal": "908.60",
        }))
        .expect("reserva payload");
        assert_eq!(reserva.hab_key, 9);
        assert_eq!(reserva.ingreso_total, Decimal::new(90860, 2));
    }
}
