use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

const SEED_TEACHER_NAME: &str = "Tiago";
const SEED_TEACHER_EMAIL: &str = "admin@dev.com";

/// 尝试用指定插件构造缓存
async fn try_cache_backend(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name)?;
    match constructor().await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", name);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", name, e);
            None
        }
    }
}

/// 创建会话存储，配置的后端不可用时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>, Box<dyn std::error::Error>> {
    let backend = &AppConfig::get().session.backend;
    warn!("Attempting to create {} session backend", backend);

    if let Some(cache) = try_cache_backend(backend).await {
        return Ok(cache);
    }

    if backend != "moka" {
        warn!("Falling back to memory cache");
        if let Some(cache) = try_cache_backend("moka").await {
            return Ok(cache);
        }
    }

    Err(format!("No cache backend available (tried: {backend})").into())
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 没有教师时创建默认教师，返回其 ID
async fn seed_teacher(storage: &Arc<dyn Storage>) -> Option<i64> {
    match storage.count_teachers().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} teacher(s), skipping teacher seed",
                count
            );
            return storage
                .get_teacher_by_email(SEED_TEACHER_EMAIL)
                .await
                .ok()
                .flatten()
                .map(|t| t.id);
        }
        Ok(_) => {
            info!("No teachers found in database, creating default teacher account...");
        }
        Err(e) => {
            warn!("Failed to count teachers: {}, skipping teacher seed", e);
            return None;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("SEED_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  SEED PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Login: {} / {}", SEED_TEACHER_EMAIL, pwd);
        warn!("  Please save this password or set SEED_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash seed password: {}, skipping teacher seed", e);
            return None;
        }
    };

    let request = CreateTeacherRequest {
        name: SEED_TEACHER_NAME.to_string(),
        email: SEED_TEACHER_EMAIL.to_string(),
        password_hash,
        class_id: None,
    };

    match storage.create_teacher(request).await {
        Ok(teacher) => {
            info!(
                "Default teacher created successfully (ID: {}, email: {})",
                teacher.id, teacher.email
            );
            Some(teacher.id)
        }
        Err(e) => {
            warn!("Failed to create default teacher: {}", e);
            None
        }
    }
}

/// 班级表为空时写入两个示例班级
async fn seed_classes(storage: &Arc<dyn Storage>, teacher_id: Option<i64>) {
    match storage.count_classes().await {
        Ok(0) => {}
        Ok(count) => {
            debug!("Database already has {} class(es), skipping class seed", count);
            return;
        }
        Err(e) => {
            warn!("Failed to count classes: {}, skipping class seed", e);
            return;
        }
    }

    for time_slot in ["Morning", "Afternoon"] {
        let request = CreateClassRequest {
            course: "Junior Fullstack Developer".to_string(),
            class_type: "PowerUp".to_string(),
            time_slot: time_slot.to_string(),
            location: "Lisbon".to_string(),
            year: 2024,
        };
        match storage.create_class(request, teacher_id).await {
            Ok(class) => info!("Seed class created (ID: {}, {})", class.id, class.time_slot),
            Err(e) => warn!("Failed to create seed class: {}", e),
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、种子数据和会话缓存
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let teacher_id = seed_teacher(&storage).await;
    seed_classes(&storage, teacher_id).await;

    let cache = create_cache().await.expect("Failed to create session cache");
    warn!("Session backend initialized");

    StartupContext { storage, cache }
}
