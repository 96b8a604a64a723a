//! Assemblage des réponses Browse et Search.

use dmsdidl::DidlWriter;
use tracing::debug;

use crate::contentdirectory::criteria::{BrowseFlag, BrowseRequest, SearchRequest};
use crate::contentdirectory::didl_builder::DidlElementWriter;
use crate::contentdirectory::errors::ContentDirectoryError;
use crate::contentdirectory::resolver::CategoryResolver;
use crate::contentdirectory::server_item::ServerItem;
use crate::profile::DeviceProfile;

/// Arguments de sortie d'une action, dans l'ordre de la réponse
pub type Headers = Vec<(String, String)>;

/// Résultat d'un Browse ou d'un Search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseResponse {
    pub result: String,
    pub number_returned: usize,
    pub total_matches: usize,
    pub update_id: u32,
}

impl BrowseResponse {
    pub fn into_headers(self) -> Headers {
        vec![
            ("Result".to_string(), self.result),
            ("NumberReturned".to_string(), self.number_returned.to_string()),
            ("TotalMatches".to_string(), self.total_matches.to_string()),
            ("UpdateID".to_string(), self.update_id.to_string()),
        ]
    }
}

/// Produit le fragment DIDL-Lite et les compteurs d'une réponse
#[derive(Debug)]
pub struct DidlResponseAssembler<'a> {
    resolver: CategoryResolver<'a>,
    elements: &'a dyn DidlElementWriter,
    profile: &'a DeviceProfile,
}

impl<'a> DidlResponseAssembler<'a> {
    pub fn new(
        resolver: CategoryResolver<'a>,
        elements: &'a dyn DidlElementWriter,
        profile: &'a DeviceProfile,
    ) -> Self {
        Self {
            resolver,
            elements,
            profile,
        }
    }

    fn writer(&self) -> Result<DidlWriter, ContentDirectoryError> {
        Ok(DidlWriter::new(&self.profile.xml_root_attributes)?)
    }

    pub async fn browse(
        &self,
        node: &ServerItem,
        request: &BrowseRequest,
        update_id: u32,
    ) -> Result<BrowseResponse, ContentDirectoryError> {
        let mut writer = self.writer()?;

        let (number_returned, total_matches) = match request.flag {
            BrowseFlag::Metadata => {
                if node.is_displayed_as_folder() {
                    let child_count = self.resolver.child_count(node).await?;
                    self.elements.write_folder_element(
                        &mut writer,
                        node,
                        None,
                        child_count,
                        &request.filter,
                        Some(&request.object_id),
                    )?;
                } else {
                    self.elements.write_item_element(
                        &mut writer,
                        node.item(),
                        None,
                        None,
                        &request.filter,
                    )?;
                }
                (1, 1)
            }
            BrowseFlag::DirectChildren => {
                let children = self
                    .resolver
                    .resolve(
                        node,
                        &request.sort,
                        request.start_index,
                        request.requested_count,
                    )
                    .await?;

                for child in &children.items {
                    if child.is_displayed_as_folder() {
                        let child_count = self.resolver.child_count(child).await?;
                        self.elements.write_folder_element(
                            &mut writer,
                            child,
                            Some(node.item()),
                            child_count,
                            &request.filter,
                            None,
                        )?;
                    } else {
                        self.elements.write_item_element(
                            &mut writer,
                            child.item(),
                            Some(node.item()),
                            node.stub(),
                            &request.filter,
                        )?;
                    }
                }
                (children.items.len(), children.total_record_count)
            }
        };

        debug!(
            "📂 Browse '{}' ({:?}): {}/{}",
            request.object_id, request.flag, number_returned, total_matches
        );

        Ok(BrowseResponse {
            result: writer.finish()?,
            number_returned,
            total_matches,
            update_id,
        })
    }

    pub async fn search(
        &self,
        container: &ServerItem,
        request: &SearchRequest,
        update_id: u32,
    ) -> Result<BrowseResponse, ContentDirectoryError> {
        let mut writer = self.writer()?;
        let found = self
            .resolver
            .search_children(
                container.item(),
                &request.criteria,
                &request.sort,
                request.start_index,
                request.requested_count,
            )
            .await?;

        let number_returned = found.items.len();
        for item in found.items {
            if item.is_displayed_as_folder() {
                let child_count = self
                    .resolver
                    .search_child_count(&item, &request.criteria)
                    .await?;
                let node = ServerItem::Real(item);
                self.elements.write_folder_element(
                    &mut writer,
                    &node,
                    Some(container.item()),
                    child_count,
                    &request.filter,
                    None,
                )?;
            } else {
                self.elements.write_item_element(
                    &mut writer,
                    &item,
                    Some(container.item()),
                    None,
                    &request.filter,
                )?;
            }
        }

        debug!(
            "🔍 Search '{}': {}/{}",
            request.container_id, number_returned, found.total_record_count
        );

        Ok(BrowseResponse {
            result: writer.finish()?,
            number_returned,
            total_matches: found.total_record_count,
            update_id,
        })
    }
}
