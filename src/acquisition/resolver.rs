//! # 自定义选择结果的路径解析钩子
//!
//! 通用选择器交付的引用往往是内容提供方引用，应用可能需要先解析成本地路径
//! （例如复制到缓存目录）再继续。这里只定义钩子，具体逻辑由宿主注入。

use super::AcquireError;

pub trait PathResolver {
    /// 将选择器交付的引用解析为应用可用的引用。
    fn resolve(&mut self, reference: &str) -> Result<String, AcquireError>;
}

/// 默认实现：原样返回。
#[derive(Debug, Default)]
pub struct PassThroughResolver;

impl PathResolver for PassThroughResolver {
    fn resolve(&mut self, reference: &str) -> Result<String, AcquireError> {
        Ok(reference.to_string())
    }
}

impl<F> PathResolver for F
where
    F: FnMut(&str) -> Result<String, AcquireError>,
{
    fn resolve(&mut self, reference: &str) -> Result<String, AcquireError> {
        self(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_through_keeps_reference() {
        let mut resolver = PassThroughResolver;
        assert_eq!(
            resolver.resolve("content://media/external/images/7"),
            Ok("content://media/external/images/7".to_string())
        );
    }

    #[test]
    fn closures_act_as_resolvers() {
        let mut calls = 0;
        let mut resolver = |reference: &str| -> Result<String, AcquireError> {
            calls += 1;
            Ok(format!("file:/cache/{}", reference.rsplit('/').next().unwrap_or_default()))
        };

        assert_eq!(
            PathResolver::resolve(&mut resolver, "content://media/7"),
            Ok("file:/cache/7".to_string())
        );
        drop(resolver);
        assert_eq!(calls, 1);
    }
}
