//! # gRPC Service
//!
//! [`AdService`] implementation over [`AdsService`].

use crate::api::grpc::proto::{
    AdResponse, AdService, ChangeAdStatusRequest, CreateAdRequest, CreateUserRequest,
    DeleteAdRequest, DeleteUserRequest, Empty, GetAdRequest, GetUserRequest, ListAdResponse,
    ListAdsRequest, UpdateAdRequest, UserResponse,
};
use crate::application::{AdsService, RequestContext};
use crate::domain::value_objects::{AdFilter, AdId, Caller, UserId};
use tonic::{Request, Response, Status};

/// Metadata key carrying a client-chosen request id.
pub const REQUEST_ID_METADATA: &str = "x-request-id";

fn context<T>(request: &Request<T>) -> RequestContext {
    let header = request
        .metadata()
        .get(REQUEST_ID_METADATA)
        .and_then(|value| value.to_str().ok());
    RequestContext::from_header(header)
}

/// gRPC front end of the ads service.
#[derive(Debug, Clone)]
pub struct AdServiceImpl {
    service: AdsService,
}

impl AdServiceImpl {
    /// Creates the gRPC service over `service`.
    #[must_use]
    pub fn new(service: AdsService) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl AdService for AdServiceImpl {
    async fn create_ad(
        &self,
        request: Request<CreateAdRequest>,
    ) -> Result<Response<AdResponse>, Status> {
        let ctx = context(&request);
        let req = request.into_inner();
        let ad = self
            .service
            .create_ad(&ctx, &req.title, &req.text, UserId::new(req.user_id))
            .await?;
        Ok(Response::new(AdResponse::from(&ad)))
    }

    async fn change_ad_status(
        &self,
        request: Request<ChangeAdStatusRequest>,
    ) -> Result<Response<AdResponse>, Status> {
        let ctx = context(&request);
        let req = request.into_inner();
        let ad = self
            .service
            .change_ad_status(
                &ctx,
                AdId::new(req.ad_id),
                Caller::new(UserId::new(req.user_id)),
                req.published,
            )
            .await?;
        Ok(Response::new(AdResponse::from(&ad)))
    }

    async fn update_ad(
        &self,
        request: Request<UpdateAdRequest>,
    ) -> Result<Response<AdResponse>, Status> {
        let ctx = context(&request);
        let req = request.into_inner();
        let ad = self
            .service
            .update_ad(
                &ctx,
                AdId::new(req.ad_id),
                Caller::new(UserId::new(req.user_id)),
                &req.title,
                &req.text,
            )
            .await?;
        Ok(Response::new(AdResponse::from(&ad)))
    }

    async fn list_ads(
        &self,
        request: Request<ListAdsRequest>,
    ) -> Result<Response<ListAdResponse>, Status> {
        let ctx = context(&request);
        let filter = AdFilter::from(request.get_ref());
        let ads = self.service.list_ads(&ctx, &filter).await?;
        Ok(Response::new(ListAdResponse {
            list: ads.iter().map(AdResponse::from).collect(),
        }))
    }

    async fn get_ad(&self, request: Request<GetAdRequest>) -> Result<Response<AdResponse>, Status> {
        let ctx = context(&request);
        let ad = self
            .service
            .get_ad(&ctx, AdId::new(request.get_ref().id))
            .await?;
        Ok(Response::new(AdResponse::from(&ad)))
    }

    async fn delete_ad(&self, request: Request<DeleteAdRequest>) -> Result<Response<Empty>, Status> {
        let ctx = context(&request);
        let req = request.into_inner();
        self.service
            .delete_ad(
                &ctx,
                AdId::new(req.ad_id),
                Caller::new(UserId::new(req.author_id)),
            )
            .await?;
        Ok(Response::new(Empty {}))
    }

    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let ctx = context(&request);
        let user = self
            .service
            .create_user(&ctx, &request.get_ref().name)
            .await?;
        Ok(Response::new(UserResponse::from(&user)))
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let ctx = context(&request);
        let user = self
            .service
            .get_user(&ctx, UserId::new(request.get_ref().id))
            .await?;
        Ok(Response::new(UserResponse::from(&user)))
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<Empty>, Status> {
        let ctx = context(&request);
        self.service
            .delete_user(&ctx, UserId::new(request.get_ref().id))
            .await?;
        Ok(Response::new(Empty {}))
    }
}
