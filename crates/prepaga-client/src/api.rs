//! Endpoint methods.
//!
//! Affiliates, plans and therapeutic situations live under `/api`;
//! providers and specialties do not.

use prepaga_core::forms::{AffiliateUpdate, NewAffiliatePayload};
use prepaga_core::models::{Affiliate, Plan, Provider, Specialty, TherapeuticSituation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::config::ClientConfig;
use crate::transport::{dispatch, ApiRequest, HttpTransport, Transport};
use crate::wire::{
    nullable_list, provider_from_backend, provider_to_backend, providers_from_value,
    BackendProvider, BackendSpecialty,
};
use crate::ApiResult;

/// Client for the back-office API over any [`Transport`].
pub struct BackOfficeClient<T: Transport> {
    transport: T,
}

impl BackOfficeClient<HttpTransport> {
    /// HTTP client for the given configuration.
    pub fn connect(config: ClientConfig) -> ApiResult<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    /// HTTP client configured from the environment.
    pub fn from_env() -> ApiResult<Self> {
        Self::connect(ClientConfig::from_env()?)
    }
}

impl<T: Transport> BackOfficeClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        dispatch(&self.transport, &request)
    }

    fn get_list<R: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<R>> {
        let value = self.send(ApiRequest::get(path))?;
        Ok(nullable_list(value)?)
    }

    fn get_one<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        let value = self.send(ApiRequest::get(path))?;
        Ok(serde_json::from_value(value)?)
    }

    fn body<B: Serialize>(body: &B) -> ApiResult<Value> {
        Ok(serde_json::to_value(body)?)
    }

    // ==================== Affiliates ====================

    pub fn list_affiliates(&self) -> ApiResult<Vec<Affiliate>> {
        self.get_list("/api/affiliates")
    }

    /// Members of the family group of a DNI or base credential.
    pub fn family_group(&self, dni: &str) -> ApiResult<Vec<Affiliate>> {
        self.get_list(&format!("/api/affiliates/family/{}", dni))
    }

    /// Create an affiliate together with its family members.
    pub fn create_affiliate(&self, payload: &NewAffiliatePayload) -> ApiResult<Value> {
        let created = self.send(ApiRequest::post("/api/affiliates", Self::body(payload)?))?;
        info!(dni = %payload.dni, familiares = payload.familiares.len(), "Affiliate created");
        Ok(created)
    }

    pub fn update_affiliate(&self, dni: &str, update: &AffiliateUpdate) -> ApiResult<Value> {
        let updated = self.send(ApiRequest::put(
            format!("/api/affiliates/{}", dni),
            Self::body(update)?,
        ))?;
        info!(dni = %dni, "Affiliate updated");
        Ok(updated)
    }

    /// Delete by DNI. The server cascades a titular's deletion to the group.
    pub fn delete_affiliate(&self, dni: &str) -> ApiResult<()> {
        self.send(ApiRequest::delete(format!("/api/affiliates/{}", dni)))?;
        info!(dni = %dni, "Affiliate deleted");
        Ok(())
    }

    /// Schedule a deletion for `scheduled_date` (ISO-8601, UTC).
    pub fn schedule_affiliate_deletion(&self, dni: &str, scheduled_date: &str) -> ApiResult<()> {
        self.send(ApiRequest::post(
            format!("/api/affiliates/{}/schedule-delete", dni),
            json!({ "scheduledDate": scheduled_date }),
        ))?;
        info!(dni = %dni, scheduled_date = %scheduled_date, "Affiliate deletion scheduled");
        Ok(())
    }

    // ==================== Providers ====================

    pub fn list_providers(&self) -> ApiResult<Vec<Provider>> {
        let value = self.send(ApiRequest::get("/providers"))?;
        Ok(providers_from_value(value)?)
    }

    pub fn get_provider(&self, cuit: &str) -> ApiResult<Provider> {
        let backend: BackendProvider = self.get_one(&format!("/providers/{}", cuit))?;
        Ok(provider_from_backend(backend))
    }

    pub fn create_provider(&self, provider: &Provider) -> ApiResult<Value> {
        let body = Self::body(&provider_to_backend(provider))?;
        let created = self.send(ApiRequest::post("/providers", body))?;
        info!(cuit = %provider.cuil_cuit, "Provider created");
        Ok(created)
    }

    pub fn update_provider(&self, cuit: &str, provider: &Provider) -> ApiResult<Value> {
        let body = Self::body(&provider_to_backend(provider))?;
        let updated = self.send(ApiRequest::put(format!("/providers/{}", cuit), body))?;
        info!(cuit = %cuit, "Provider updated");
        Ok(updated)
    }

    pub fn delete_provider(&self, cuit: &str) -> ApiResult<()> {
        self.send(ApiRequest::delete(format!("/providers/{}", cuit)))?;
        info!(cuit = %cuit, "Provider deleted");
        Ok(())
    }

    // ==================== Catalogs ====================

    pub fn list_specialties(&self) -> ApiResult<Vec<Specialty>> {
        let list: Vec<BackendSpecialty> = self.get_list("/especialidades")?;
        Ok(list.into_iter().map(Specialty::from).collect())
    }

    pub fn get_specialty(&self, id: &str) -> ApiResult<Specialty> {
        let record: BackendSpecialty = self.get_one(&format!("/especialidades/{}", id))?;
        Ok(record.into())
    }

    pub fn list_plans(&self) -> ApiResult<Vec<Plan>> {
        self.get_list("/api/plans")
    }

    pub fn list_therapeutic_situations(&self) -> ApiResult<Vec<TherapeuticSituation>> {
        self.get_list("/api/therapeutic")
    }

    pub fn get_therapeutic_situation(&self, id: i64) -> ApiResult<TherapeuticSituation> {
        self.get_one(&format!("/api/therapeutic/{}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{ApiResponse, HttpMethod, MockTransport};
    use prepaga_core::models::{ProviderKind, Weekday};

    fn client() -> BackOfficeClient<MockTransport> {
        BackOfficeClient::new(MockTransport::new())
    }

    #[test]
    fn test_affiliate_paths() {
        let c = client();
        c.transport()
            .respond_json(json!([{"dni": "1", "credencial": "0000001-01"}]))
            .respond_json(json!([]))
            .respond(ApiResponse::no_content())
            .respond(ApiResponse::no_content());

        let list = c.list_affiliates().unwrap();
        assert_eq!(list[0].credential, "0000001-01");
        assert!(c.family_group("1").unwrap().is_empty());
        c.delete_affiliate("1").unwrap();
        c.schedule_affiliate_deletion("1", "2026-10-21T03:00:00.000Z").unwrap();

        let sent = c.transport().requests();
        assert_eq!(sent[0].path, "/api/affiliates");
        assert_eq!(sent[1].path, "/api/affiliates/family/1");
        assert_eq!(sent[2].method, HttpMethod::Delete);
        assert_eq!(sent[2].path, "/api/affiliates/1");
        assert_eq!(sent[3].method, HttpMethod::Post);
        assert_eq!(sent[3].path, "/api/affiliates/1/schedule-delete");
        assert_eq!(
            sent[3].body,
            Some(json!({"scheduledDate": "2026-10-21T03:00:00.000Z"}))
        );
    }

    #[test]
    fn test_provider_paths_have_no_api_prefix() {
        let c = client();
        c.transport()
            .respond_json(json!([{"cuitCuil": "20-1", "tipoPrestador": "centro_medico"}]))
            .respond_json(json!({"cuitCuil": "20-1", "nombreCompleto": "Ana"}))
            .respond_json(json!({}))
            .respond(ApiResponse::no_content());

        let list = c.list_providers().unwrap();
        assert!(list[0].is_center());
        let one = c.get_provider("20-1").unwrap();
        assert_eq!(one.full_name, "Ana");
        c.update_provider("20-1", &Provider::new("20-1", "Ana", ProviderKind::Professional))
            .unwrap();
        c.delete_provider("20-1").unwrap();

        let sent = c.transport().requests();
        assert_eq!(sent[0].path, "/providers");
        assert_eq!(sent[1].path, "/providers/20-1");
        assert_eq!(sent[2].method, HttpMethod::Put);
        let body = sent[2].body.as_ref().unwrap();
        assert_eq!(body["cuitCuil"], "20-1");
        assert_eq!(body["tipoPrestador"], "profesional");
        assert_eq!(sent[3].path, "/providers/20-1");
    }

    #[test]
    fn test_catalogs() {
        let c = client();
        c.transport()
            .respond_json(json!([{"idEspecialidad": 1, "nombre": "Cardiología"}]))
            .respond_json(json!({"idEspecialidad": 2, "nombre": "Pediatría"}))
            .respond_json(json!([{"idPlan": 1, "nombre": "210"}]))
            .respond_json(json!([{"id": 1, "nombre": "Embarazo"}]))
            .respond_json(json!({"id": 3, "nombre": "Diabetes"}));

        assert_eq!(c.list_specialties().unwrap()[0].id, "1");
        assert_eq!(c.get_specialty("2").unwrap().name, "Pediatría");
        assert_eq!(c.list_plans().unwrap()[0].name, "210");
        assert_eq!(c.list_therapeutic_situations().unwrap().len(), 1);
        assert_eq!(c.get_therapeutic_situation(3).unwrap().name, "Diabetes");

        let paths: Vec<String> = c.transport().requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                "/especialidades",
                "/especialidades/2",
                "/api/plans",
                "/api/therapeutic",
                "/api/therapeutic/3"
            ]
        );
    }

    #[test]
    fn test_lists_tolerate_nulls_and_sunday() {
        let c = client();
        c.transport()
            .respond_json(json!([{
                "dni": "30111222",
                "credencial": "0000003-01",
                "direccion": null,
                "telefonos": null,
                "email": null
            }]))
            .respond_json(json!([{
                "cuitCuil": "20-1",
                "lugarAtencion": {
                    "direccion": "Belgrano 99",
                    "localidad": null,
                    "horarios": [{"dias": [0, 6], "desde": "09:00", "hasta": "13:00"}]
                }
            }]));

        let affiliates = c.list_affiliates().unwrap();
        assert!(affiliates[0].address.is_empty());
        assert!(affiliates[0].phones.is_empty());

        let providers = c.list_providers().unwrap();
        let days = &providers[0].addresses[0].schedule[0].days;
        assert_eq!(days, &vec![Weekday::Sunday, Weekday::Saturday]);
    }

    #[test]
    fn test_server_message_surfaces() {
        let c = client();
        c.transport()
            .respond(ApiResponse::new(409, r#"{"message":"El DNI ya existe"}"#));
        let err = c.delete_affiliate("1").unwrap_err();
        assert_eq!(err.to_string(), "El DNI ya existe");
    }
}
