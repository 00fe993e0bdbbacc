use crate::db::query_builder::{layout_query, BuiltQuery};
use crate::domain::landmark::{Landmark, LandmarkPoints, LandmarkType};
use crate::errors::ServerError;
use rusqlite::{params, params_from_iter, Connection};

/// Landmarks of one type for the given cities.
/// `None` when the city list breaks the 1-or-3 contract.
pub fn get_layout(
    conn: &Connection,
    landmark_type: LandmarkType,
    cities: &[&str],
) -> Result<Option<LandmarkPoints>, ServerError> {
    let Some(BuiltQuery { sql, params }) = layout_query(landmark_type.as_str(), cities) else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
        Ok((
            row.get::<_, Option<f64>>(0)?,
            row.get::<_, Option<f64>>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = LandmarkPoints::default();
    for r in rows {
        let (lng, lat, name) = r?;
        // A landmark without coordinates cannot be drawn.
        let (Some(lng), Some(lat)) = (lng, lat) else {
            continue;
        };
        out.lons.push(lng);
        out.lats.push(lat);
        out.names.push(name);
    }
    Ok(Some(out))
}

pub fn insert_landmarks(conn: &mut Connection, landmarks: &[Landmark]) -> Result<usize, ServerError> {
    let tx = conn.transaction()?;
    for l in landmarks {
        tx.execute(
            r#"
            INSERT INTO city_layout (landmark_name, landmark_type, landmark_lat, landmark_lng, landmark_rating, city_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![l.name, l.kind.as_str(), l.lat, l.lng, l.rating, l.city_id],
        )
        .map_err(|e| ServerError::DbError(format!("Insert landmark failed: {e}")))?;
    }
    tx.commit()?;
    Ok(landmarks.len())
}
