use seo_audit::config::{HttpConfig, SitemapConfig};
use seo_audit::service::{discover_sitemap, PageFetcher, SitemapCrawler};
use seo_audit::test_utils::fixtures::{sitemap_index_xml, urlset_xml};

fn crawler() -> SitemapCrawler {
    SitemapCrawler::new(
        PageFetcher::new(&HttpConfig::default()).unwrap(),
        SitemapConfig {
            jitter_min_ms: 1,
            jitter_max_ms: 5,
            ..SitemapConfig::default()
        },
    )
}

#[tokio::test]
async fn discovered_index_is_flattened_in_order() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();
    let blog = format!("{base}/blog-sitemap.xml");
    let shop = format!("{base}/shop-sitemap.xml");

    let _root = server
        .mock("GET", "/sitemap.xml")
        .with_body(sitemap_index_xml(&[blog.as_str(), shop.as_str()]))
        .create_async()
        .await;
    let _blog = server
        .mock("GET", "/blog-sitemap.xml")
        .with_body(urlset_xml(&["https://site.test/blog/1", "https://site.test/blog/2"]))
        .create_async()
        .await;
    let _shop = server
        .mock("GET", "/shop-sitemap.xml")
        .with_body("https://site.test/shop/1\nhttps://site.test/shop/2\n")
        .create_async()
        .await;

    let sitemap_url = discover_sitemap(&format!("{base}/some/page")).unwrap();
    let entries = crawler().crawl(sitemap_url.as_str()).await.unwrap();
    let locs: Vec<_> = entries.iter().map(|e| e.loc.as_str()).collect();

    assert_eq!(
        locs,
        vec![
            "https://site.test/blog/1",
            "https://site.test/blog/2",
            "https://site.test/shop/1",
            "https://site.test/shop/2",
        ]
    );
}

#[tokio::test]
async fn malformed_root_sitemap_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _root = server
        .mock("GET", "/sitemap.xml")
        .with_body("<urlset><url><loc>https://site.test/</loc></urlx></urlset>")
        .create_async()
        .await;

    let result = crawler()
        .crawl(&format!("{}/sitemap.xml", server.url()))
        .await;
    assert!(result.is_err());
}
