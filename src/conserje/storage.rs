//! SQL storage for the reservation schema.
//!
//! Every query is hand-written with explicit joins and column aliases; rows
//! are read column-by-column into the canonical output shapes, so related
//! entities are resolved in the same round trip instead of being lazily
//! traversed. Check-then-insert operations run inside one transaction and
//! rely on the schema's unique constraints as the backstop for concurrent
//! writers.

use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::{info_span, Instrument};

use super::error::{is_unique_violation, ApiError};
use super::handlers::types::{
    CanalReservaOut, ClienteIn, ClienteOut, FechaIn, FechaOut, HabitacionIn, HabitacionOut,
    HotelIn, HotelOut, PagoOut, ReservaIn, ReservaOut, TipoHabOut,
};

/// Hard cap applied to the larger listings. Not a page size: there is no
/// cursor, rows beyond the cap are simply not returned.
pub const LIST_CAP: i64 = 10;

pub const MSG_HOTEL_DUPLICADO: &str = "Ya existe un hotel con ese nombre";
pub const MSG_HOTEL_NO_ENCONTRADO: &str = "Hotel no encontrado";

const HOTEL_COLS: &str = r#"
    h."HotelKey" AS hotel_key, h."HotelID" AS hotel_id, h."Nombre" AS hotel_nombre,
    h."Cadena" AS hotel_cadena, h."Ciudad" AS hotel_ciudad, h."Pais" AS hotel_pais,
    h."Estrellas" AS hotel_estrellas, h."Direccion" AS hotel_direccion"#;

const CLIENTE_COLS: &str = r#"
    c."ClienteKey" AS cliente_key, c."ClienteID" AS cliente_id, c."Nombre" AS cliente_nombre,
    c."Apellido" AS cliente_apellido, c."Genero" AS cliente_genero,
    c."Nacionalidad" AS cliente_nacionalidad, c."TipoCliente" AS cliente_tipo"#;

const TIPO_HAB_COLS: &str = r#"
    t."TipoHabKey" AS tipo_hab_key, t."TipoHabID" AS tipo_hab_id,
    t."Descripcion" AS tipo_hab_descripcion, t."Categoria" AS tipo_hab_categoria,
    t."CapacidadMax" AS tipo_hab_capacidad_max, t."TarifaEstandar" AS tipo_hab_tarifa"#;

const HABITACION_COLS: &str = r#"
    hb."HabitacionKey" AS habitacion_key, hb."HabitacionID" AS habitacion_id,
    hb."NumeroHab" AS habitacion_numero, hb."Piso" AS habitacion_piso,
    hb."Capacidad" AS habitacion_capacidad, hb."Vista" AS habitacion_vista"#;

const FECHA_COLS: &str = r#"
    f."FechaKey" AS fecha_key, f."Fecha" AS fecha_valor, f."Año" AS fecha_anio,
    f."Trimestre" AS fecha_trimestre, f."Mes" AS fecha_mes, f."Dia" AS fecha_dia,
    f."DiaSemana" AS fecha_dia_semana, f."EsFinDeSemana" AS fecha_es_fin_de_semana"#;

fn hotel_from_row(row: &PgRow) -> HotelOut {
    HotelOut {
        hotel_key: row.get("hotel_key"),
        hotel_id: row.get("hotel_id"),
        nombre: row.get("hotel_nombre"),
        cadena: row.get("hotel_cadena"),
        ciudad: row.get("hotel_ciudad"),
        pais: row.get("hotel_pais"),
        estrellas: row.get("hotel_estrellas"),
        direccion: row.get("hotel_direccion"),
    }
}

fn cliente_from_row(row: &PgRow) -> ClienteOut {
    ClienteOut {
        cliente_key: row.get("cliente_key"),
        cliente_id: row.get("cliente_id"),
        nombre: row.get("cliente_nombre"),
        apellido: row.get("cliente_apellido"),
        genero: row.get("cliente_genero"),
        nacionalidad: row.get("cliente_nacionalidad"),
        tipo_cliente: row.get("cliente_tipo"),
    }
}

fn tipo_hab_from_row(row: &PgRow) -> TipoHabOut {
    TipoHabOut {
        tipo_hab_key: row.get("tipo_hab_key"),
        tipo_hab_id: row.get("tipo_hab_id"),
        descripcion: row.get("tipo_hab_descripcion"),
        categoria: row.get("tipo_hab_categoria"),
        capacidad_max: row.get("tipo_hab_capacidad_max"),
        tarifa_estandar: row.get("tipo_hab_tarifa"),
    }
}

fn habitacion_from_row(row: &PgRow) -> HabitacionOut {
    HabitacionOut {
        habitacion_key: row.get("habitacion_key"),
        habitacion_id: row.get("habitacion_id"),
        numero_hab: row.get("habitacion_numero"),
        piso: row.get("habitacion_piso"),
        capacidad: row.get("habitacion_capacidad"),
        vista: row.get("habitacion_vista"),
        tipo_hab: tipo_hab_from_row(row),
    }
}

fn fecha_from_row(row: &PgRow) -> FechaOut {
    FechaOut {
        fecha_key: row.get("fecha_key"),
        fecha: row.get("fecha_valor"),
        anio: row.get("fecha_anio"),
        trimestre: row.get("fecha_trimestre"),
        mes: row.get("fecha_mes"),
        dia: row.get("fecha_dia"),
        dia_semana: row.get("fecha_dia_semana"),
        es_fin_de_semana: row.get("fecha_es_fin_de_semana"),
    }
}

fn reserva_from_row(row: &PgRow) -> ReservaOut {
    ReservaOut {
        reserva_key: row.get("reserva_key"),
        hotel: hotel_from_row(row),
        cliente: cliente_from_row(row),
        habitacion: habitacion_from_row(row),
        fecha: fecha_from_row(row),
        emp_key: row.get("emp_key"),
        canal_key: row.get("canal_key"),
        pago_key: row.get("pago_key"),
        noches_reservadas: row.get("noches_reservadas"),
        cantidad_huespedes: row.get("cantidad_huespedes"),
        ingreso_habitacion: row.get("ingreso_habitacion"),
        ingreso_servicios: row.get("ingreso_servicios"),
        descuento_total: row.get("descuento_total"),
        impuesto_total: row.get("impuesto_total"),
        lead_time_reserva: row.get("lead_time_reserva"),
        ingreso_total: row.get("ingreso_total"),
    }
}

/// Credential row used by the login gate.
#[derive(Debug)]
pub struct Credencial {
    pub emp_key: i32,
    pub password_hash: String,
    pub rol: String,
    pub estado: bool,
}

pub async fn fetch_credencial(
    pool: &PgPool,
    usuario: &str,
) -> Result<Option<Credencial>, ApiError> {
    let query = r#"
        SELECT "EmpKey" AS emp_key, "PasswordHash" AS password_hash,
               "Rol" AS rol, "Estado" AS estado
        FROM credencial
        WHERE "Usuario" = $1
    "#;
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(usuario)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.map(|row| Credencial {
        emp_key: row.get("emp_key"),
        password_hash: row.get("password_hash"),
        rol: row.get("rol"),
        estado: row.get("estado"),
    }))
}

pub async fn list_hoteles(pool: &PgPool) -> Result<Vec<HotelOut>, ApiError> {
    let query = format!(r#"SELECT {HOTEL_COLS} FROM hotel AS h ORDER BY h."HotelKey""#);
    let rows = sqlx::query(&query).fetch_all(pool).await?;

    Ok(rows.iter().map(hotel_from_row).collect())
}

pub async fn insert_hotel(pool: &PgPool, hotel: &HotelIn) -> Result<HotelOut, ApiError> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query(r#"SELECT "HotelKey" FROM hotel WHERE "Nombre" = $1"#)
        .bind(&hotel.nombre)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        let _ = tx.rollback().await;
        return Err(ApiError::Conflict(MSG_HOTEL_DUPLICADO));
    }

    let query = format!(
        r#"
        INSERT INTO hotel AS h
            ("HotelID", "Nombre", "Cadena", "Ciudad", "Pais", "Estrellas", "Direccion")
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {HOTEL_COLS}
        "#
    );
    let inserted = sqlx::query(&query)
        .bind(hotel.hotel_id)
        .bind(&hotel.nombre)
        .bind(&hotel.cadena)
        .bind(&hotel.ciudad)
        .bind(&hotel.pais)
        .bind(hotel.estrellas)
        .bind(&hotel.direccion)
        .fetch_one(&mut *tx)
        .await;

    let row = match inserted {
        Ok(row) => row,
        Err(err) => {
            let _ = tx.rollback().await;
            // A concurrent writer won the name; report it the same way the
            // pre-check would have.
            if is_unique_violation(&err) {
                return Err(ApiError::Conflict(MSG_HOTEL_DUPLICADO));
            }
            return Err(ApiError::Database(err));
        }
    };

    tx.commit().await?;

    Ok(hotel_from_row(&row))
}

pub async fn list_clientes(pool: &PgPool) -> Result<Vec<ClienteOut>, ApiError> {
    let query = format!(
        r#"SELECT {CLIENTE_COLS} FROM cliente AS c ORDER BY c."ClienteKey" LIMIT {LIST_CAP}"#
    );
    let rows = sqlx::query(&query).fetch_all(pool).await?;

    Ok(rows.iter().map(cliente_from_row).collect())
}

pub async fn insert_cliente(pool: &PgPool, cliente: &ClienteIn) -> Result<ClienteOut, ApiError> {
    // Single-statement insert; RETURNING picks up the generated key and the
    // sequence-assigned ClienteID.
    let query = format!(
        r#"
        INSERT INTO cliente AS c
            ("Nombre", "Apellido", "Genero", "Nacionalidad", "TipoCliente")
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {CLIENTE_COLS}
        "#
    );
    let row = sqlx::query(&query)
        .bind(&cliente.nombre)
        .bind(&cliente.apellido)
        .bind(&cliente.genero)
        .bind(&cliente.nacionalidad)
        .bind(&cliente.tipo_cliente)
        .fetch_one(pool)
        .await?;

    Ok(cliente_from_row(&row))
}

pub async fn list_fechas(pool: &PgPool) -> Result<Vec<FechaOut>, ApiError> {
    let query =
        format!(r#"SELECT {FECHA_COLS} FROM fecha AS f ORDER BY f."FechaKey" LIMIT {LIST_CAP}"#);
    let rows = sqlx::query(&query).fetch_all(pool).await?;

    Ok(rows.iter().map(fecha_from_row).collect())
}

/// Get-or-create on the calendar date: an existing row is returned with its
/// key unchanged, never duplicated.
pub async fn get_or_create_fecha(pool: &PgPool, fecha: &FechaIn) -> Result<FechaOut, ApiError> {
    let select = format!(r#"SELECT {FECHA_COLS} FROM fecha AS f WHERE f."Fecha" = $1"#);

    let mut tx = pool.begin().await?;

    if let Some(row) = sqlx::query(&select)
        .bind(fecha.fecha)
        .fetch_optional(&mut *tx)
        .await?
    {
        tx.commit().await?;
        return Ok(fecha_from_row(&row));
    }

    let insert = format!(
        r#"
        INSERT INTO fecha AS f
            ("Fecha", "Año", "Trimestre", "Mes", "Dia", "DiaSemana", "EsFinDeSemana")
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {FECHA_COLS}
        "#
    );
    let inserted = sqlx::query(&insert)
        .bind(fecha.fecha)
        .bind(fecha.anio)
        .bind(fecha.trimestre)
        .bind(fecha.mes)
        .bind(fecha.dia)
        .bind(&fecha.dia_semana)
        .bind(fecha.es_fin_de_semana)
        .fetch_one(&mut *tx)
        .await;

    match inserted {
        Ok(row) => {
            tx.commit().await?;
            Ok(fecha_from_row(&row))
        }
        Err(err) if is_unique_violation(&err) => {
            // Lost the race: the committed winner is the canonical row.
            let _ = tx.rollback().await;
            let row = sqlx::query(&select).bind(fecha.fecha).fetch_one(pool).await?;
            Ok(fecha_from_row(&row))
        }
        Err(err) => {
            let _ = tx.rollback().await;
            Err(ApiError::Database(err))
        }
    }
}

pub async fn list_canales(pool: &PgPool) -> Result<Vec<CanalReservaOut>, ApiError> {
    let rows = sqlx::query(
        r#"
        SELECT "CanalKey" AS canal_key, "CanalID" AS canal_id,
               "NombreCanal" AS canal_nombre, "Descripcion" AS canal_descripcion
        FROM "canalReserva"
        ORDER BY "CanalKey"
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| CanalReservaOut {
            canal_key: row.get("canal_key"),
            canal_id: row.get("canal_id"),
            nombre_canal: row.get("canal_nombre"),
            descripcion: row.get("canal_descripcion"),
        })
        .collect())
}

pub async fn list_pagos(pool: &PgPool) -> Result<Vec<PagoOut>, ApiError> {
    let rows = sqlx::query(
        r#"
        SELECT "PagoKey" AS pago_key, "PagoID" AS pago_id,
               "Metodo" AS pago_metodo, "Moneda" AS pago_moneda
        FROM pago
        ORDER BY "PagoKey"
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| PagoOut {
            pago_key: row.get("pago_key"),
            pago_id: row.get("pago_id"),
            metodo: row.get("pago_metodo"),
            moneda: row.get("pago_moneda"),
        })
        .collect())
}

pub async fn list_tipos_hab(pool: &PgPool) -> Result<Vec<TipoHabOut>, ApiError> {
    let query = format!(
        r#"SELECT {TIPO_HAB_COLS} FROM "tipoHab" AS t ORDER BY t."TipoHabKey" LIMIT {LIST_CAP}"#
    );
    let rows = sqlx::query(&query).fetch_all(pool).await?;

    Ok(rows.iter().map(tipo_hab_from_row).collect())
}

pub async fn list_habitaciones(
    pool: &PgPool,
    hotel_key: i32,
) -> Result<Vec<HabitacionOut>, ApiError> {
    let query = format!(
        r#"
        SELECT {HABITACION_COLS}, {TIPO_HAB_COLS}
        FROM habitacion AS hb
        JOIN "tipoHab" AS t ON t."TipoHabKey" = hb."TipoHabKey"
        WHERE hb."HotelKey" = $1
        ORDER BY hb."HabitacionKey"
        "#
    );
    let rows = sqlx::query(&query).bind(hotel_key).fetch_all(pool).await?;

    Ok(rows.iter().map(habitacion_from_row).collect())
}

pub async fn insert_habitacion(
    pool: &PgPool,
    habitacion: &HabitacionIn,
) -> Result<HabitacionOut, ApiError> {
    let mut tx = pool.begin().await?;

    let hotel = sqlx::query(r#"SELECT "HotelKey" FROM hotel WHERE "HotelKey" = $1"#)
        .bind(habitacion.hotel_key)
        .fetch_optional(&mut *tx)
        .await?;
    if hotel.is_none() {
        let _ = tx.rollback().await;
        return Err(ApiError::NotFound(MSG_HOTEL_NO_ENCONTRADO));
    }

    let row = sqlx::query(
        r#"
        INSERT INTO habitacion
            ("HabitacionID", "HotelKey", "TipoHabKey", "NumeroHab", "Piso", "Capacidad", "Vista")
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING "HabitacionKey" AS habitacion_key
        "#,
    )
    .bind(habitacion.habitacion_id)
    .bind(habitacion.hotel_key)
    .bind(habitacion.tipo_hab_key)
    .bind(habitacion.numero_hab)
    .bind(habitacion.piso)
    .bind(habitacion.capacidad)
    .bind(habitacion.vista)
    .fetch_one(&mut *tx)
    .await;

    let habitacion_key: i32 = match row {
        Ok(row) => row.get("habitacion_key"),
        Err(err) => {
            let _ = tx.rollback().await;
            return Err(ApiError::Database(err));
        }
    };

    let reread = format!(
        r#"
        SELECT {HABITACION_COLS}, {TIPO_HAB_COLS}
        FROM habitacion AS hb
        JOIN "tipoHab" AS t ON t."TipoHabKey" = hb."TipoHabKey"
        WHERE hb."HabitacionKey" = $1
        "#
    );
    let row = sqlx::query(&reread)
        .bind(habitacion_key)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(habitacion_from_row(&row))
}

fn reserva_select(filter: &str) -> String {
    format!(
        r#"
        SELECT r."ReservaKey" AS reserva_key, r."EmpKey" AS emp_key,
               r."CanalKey" AS canal_key, r."PagoKey" AS pago_key,
               r."NochesReservadas" AS noches_reservadas,
               r."CantidadHuespedes" AS cantidad_huespedes,
               r."IngresoHabitacion" AS ingreso_habitacion,
               r."IngresoServicios" AS ingreso_servicios,
               r."DescuentoTotal" AS descuento_total,
               r."ImpuestoTotal" AS impuesto_total,
               r."LeadTimeReserva" AS lead_time_reserva,
               r."IngresoTotal" AS ingreso_total,
               {HOTEL_COLS}, {CLIENTE_COLS}, {HABITACION_COLS}, {TIPO_HAB_COLS}, {FECHA_COLS}
        FROM reservas AS r
        JOIN hotel AS h ON h."HotelKey" = r."HotelKey"
        JOIN cliente AS c ON c."ClienteKey" = r."ClienteKey"
        JOIN habitacion AS hb ON hb."HabitacionKey" = r."HabKey"
        JOIN "tipoHab" AS t ON t."TipoHabKey" = hb."TipoHabKey"
        JOIN fecha AS f ON f."FechaKey" = r."FechaKey"
        {filter}
        "#
    )
}

pub async fn list_reservas(pool: &PgPool) -> Result<Vec<ReservaOut>, ApiError> {
    // Newest first so freshly created reservations stay visible under the cap.
    let query = reserva_select(&format!(
        r#"ORDER BY r."ReservaKey" DESC LIMIT {LIST_CAP}"#
    ));
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = "reservas joined listing"
    );
    let rows = sqlx::query(&query).fetch_all(pool).instrument(span).await?;

    Ok(rows.iter().map(reserva_from_row).collect())
}

pub async fn insert_reserva(pool: &PgPool, reserva: &ReservaIn) -> Result<ReservaOut, ApiError> {
    let mut tx = pool.begin().await?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO reservas
            ("HotelKey", "ClienteKey", "HabKey", "FechaKey", "EmpKey", "CanalKey", "PagoKey",
             "NochesReservadas", "CantidadHuespedes", "IngresoHabitacion", "IngresoServicios",
             "DescuentoTotal", "ImpuestoTotal", "LeadTimeReserva", "IngresoTotal")
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING "ReservaKey" AS reserva_key
        "#,
    )
    .bind(reserva.hotel_key)
    .bind(reserva.cliente_key)
    .bind(reserva.hab_key)
    .bind(reserva.fecha_key)
    .bind(reserva.emp_key)
    .bind(reserva.canal_key)
    .bind(reserva.pago_key)
    .bind(reserva.noches_reservadas)
    .bind(reserva.cantidad_huespedes)
    .bind(reserva.ingreso_habitacion)
    .bind(reserva.ingreso_servicios)
    .bind(reserva.descuento_total)
    .bind(reserva.impuesto_total)
    .bind(reserva.lead_time_reserva)
    .bind(reserva.ingreso_total)
    .fetch_one(&mut *tx)
    .await;

    let reserva_key: i32 = match inserted {
        Ok(row) => row.get("reserva_key"),
        Err(err) => {
            let _ = tx.rollback().await;
            return Err(ApiError::Database(err));
        }
    };

    // Re-read through the same joined shape the listing uses, so creation
    // and listing return identical payloads.
    let reread = reserva_select(r#"WHERE r."ReservaKey" = $1"#);
    let row = sqlx::query(&reread)
        .bind(reserva_key)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(reserva_from_row(&row))
}
